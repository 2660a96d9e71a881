// src/config.rs
//! Tunable parameters for gaze-dwell navigation, loaded from YAML the same way the
//! localization stack loads its sensor config. Defaults reproduce the values the
//! wheelchair prototype shipped with.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::GazeNavError;

/// Top-level configuration for the gaze navigator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeNavConfig {
    /// Collider tag a gaze hit must carry to count as traversable ground
    pub traversable_tag: String,
    /// Whether the enable switch starts in the on position
    pub start_enabled: bool,
    /// Fixation comparison strategy
    pub fixation: FixationStrategy,
    /// Dwell activation parameters
    pub activation: ActivationConfig,
    /// Navigation supervision parameters
    pub navigation: NavigationConfig,
}

/// How successive gaze samples are judged to belong to the same fixation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FixationStrategy {
    /// Hit points closer than `tolerance` (length units) are the same fixation
    Position {
        /// Maximum distance between consecutive hit points
        #[serde(default = "default_tolerance")]
        tolerance: f64,
    },
    /// Gaze directions within `tolerance_deg` of a smoothed reference are the same fixation
    Direction {
        /// Maximum angle between the current direction and the reference, in degrees
        #[serde(default = "default_tolerance_deg")]
        tolerance_deg: f64,
        /// Rate constant for pulling the reference toward the current direction (per second)
        #[serde(default = "default_smoothing_rate")]
        smoothing_rate: f64,
    },
}

/// Dwell activation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Seconds of continuous fixation before a move command is issued
    pub dwell_threshold: f64,
}

/// Navigation supervision parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Extra distance added to the agent's stopping distance when checking arrival
    pub arrival_slack: f64,
    /// Seconds a task may stay in motion before it is abandoned; `None` waits forever
    pub stall_timeout: Option<f64>,
}

impl Default for GazeNavConfig {
    fn default() -> Self {
        GazeNavConfig {
            traversable_tag: "Floor".to_string(),
            start_enabled: false,
            fixation: FixationStrategy::default(),
            activation: ActivationConfig::default(),
            navigation: NavigationConfig::default(),
        }
    }
}

fn default_tolerance() -> f64 {
    0.05
}

fn default_tolerance_deg() -> f64 {
    0.5
}

fn default_smoothing_rate() -> f64 {
    7.0
}

impl Default for FixationStrategy {
    fn default() -> Self {
        FixationStrategy::Position {
            tolerance: default_tolerance(),
        }
    }
}

impl FixationStrategy {
    /// Direction strategy with the stock tolerance and smoothing rate
    pub fn direction() -> Self {
        FixationStrategy::Direction {
            tolerance_deg: default_tolerance_deg(),
            smoothing_rate: default_smoothing_rate(),
        }
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        ActivationConfig {
            dwell_threshold: 2.0,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            arrival_slack: 0.2,
            stall_timeout: None,
        }
    }
}

impl GazeNavConfig {
    /// Loads and validates a configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, GazeNavError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| GazeNavError::Io(format!("{}: {}", path.display(), e)))?;
        let config: GazeNavConfig =
            serde_yaml::from_reader(file).map_err(|e| GazeNavError::Parse(e.to_string()))?;
        config.validate()?;
        log::info!("Loaded gaze navigation config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GazeNavError> {
        let config: GazeNavConfig =
            serde_yaml::from_str(yaml).map_err(|e| GazeNavError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter is usable by the tick loop
    pub fn validate(&self) -> Result<(), GazeNavError> {
        if self.traversable_tag.trim().is_empty() {
            return Err(invalid("traversable_tag must not be empty"));
        }

        match self.fixation {
            FixationStrategy::Position { tolerance } => {
                require_positive("fixation.tolerance", tolerance)?;
            }
            FixationStrategy::Direction {
                tolerance_deg,
                smoothing_rate,
            } => {
                require_positive("fixation.tolerance_deg", tolerance_deg)?;
                if tolerance_deg >= 180.0 {
                    return Err(invalid("fixation.tolerance_deg must be below 180"));
                }
                require_positive("fixation.smoothing_rate", smoothing_rate)?;
            }
        }

        require_positive("activation.dwell_threshold", self.activation.dwell_threshold)?;

        let slack = self.navigation.arrival_slack;
        if !slack.is_finite() || slack < 0.0 {
            return Err(invalid("navigation.arrival_slack must be a finite, non-negative number"));
        }
        if let Some(timeout) = self.navigation.stall_timeout {
            require_positive("navigation.stall_timeout", timeout)?;
        }

        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), GazeNavError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(&format!("{} must be a finite, positive number (got {})", name, value)))
    }
}

fn invalid(msg: &str) -> GazeNavError {
    GazeNavError::InvalidConfig(msg.to_string())
}
