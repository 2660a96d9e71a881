// core/fixation.rs

//! Decides per tick whether the gaze is still on the same fixation and accumulates
//! dwell time while it is. Two comparison strategies are supported: raw hit-point
//! distance, or angular distance to an exponentially smoothed gaze direction so
//! that natural eye tremor does not restart the dwell.

use log::{debug, trace};
use nalgebra::{Point3, Vector3};

use super::sample::GazeSample;
use crate::config::FixationStrategy;

/// Shortest gaze ray that still has a usable direction
const MIN_RAY_LENGTH: f64 = 1e-9;

/// What the current fixation is compared against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixationReference {
    /// Last hit point (position strategy)
    Point(Point3<f64>),
    /// Smoothed unit gaze direction (direction strategy)
    Direction(Vector3<f64>),
}

/// Reference plus accumulated dwell for the fixation in progress
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixationState {
    reference: Option<FixationReference>,
    elapsed: f64,
}

impl FixationState {
    /// Seconds the current fixation has been held
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether a fixation is in progress
    pub fn is_active(&self) -> bool {
        self.reference.is_some()
    }

    /// Current comparison reference
    pub fn reference(&self) -> Option<FixationReference> {
        self.reference
    }
}

/// How a tick's sample was classified
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixationOutcome {
    /// Nothing was sampled (controller disabled)
    Idle,
    /// First sample after a reset; dwell starts from zero
    Started,
    /// Same fixation; dwell grew by the tick duration
    Continuing,
    /// Gaze moved beyond tolerance; new reference, dwell restarted
    NewFixation,
    /// No usable hit or not on traversable ground; state was reset
    Broken,
}

/// Dwell accumulator driven by gaze samples
pub struct FixationTracker {
    strategy: FixationStrategy,
    traversable_tag: String,
    state: FixationState,
}

impl FixationTracker {
    /// Creates a tracker for the given strategy and ground tag
    pub fn new(strategy: FixationStrategy, traversable_tag: impl Into<String>) -> Self {
        FixationTracker {
            strategy,
            traversable_tag: traversable_tag.into(),
            state: FixationState::default(),
        }
    }

    /// Classifies one sample and updates the dwell accumulator
    pub fn update(&mut self, sample: &GazeSample, dt: f64) -> FixationOutcome {
        let hit = match sample.hit() {
            Some(hit) if hit.surface_tag == self.traversable_tag => hit,
            Some(hit) => {
                trace!("Gaze on '{}', not traversable", hit.surface_tag);
                self.reset();
                return FixationOutcome::Broken;
            }
            None => {
                self.reset();
                return FixationOutcome::Broken;
            }
        };

        let current = match self.strategy {
            FixationStrategy::Position { .. } => FixationReference::Point(hit.point),
            FixationStrategy::Direction { .. } => {
                match (hit.point - hit.origin).try_normalize(MIN_RAY_LENGTH) {
                    Some(direction) => FixationReference::Direction(direction),
                    None => {
                        debug!("Degenerate gaze ray at {:?}", hit.point);
                        self.reset();
                        return FixationOutcome::Broken;
                    }
                }
            }
        };

        let strategy = self.strategy;
        let Some(reference) = self.state.reference.as_mut() else {
            self.state.reference = Some(current);
            self.state.elapsed = 0.0;
            return FixationOutcome::Started;
        };

        let same = match (strategy, &mut *reference, current) {
            (FixationStrategy::Position { tolerance }, FixationReference::Point(last), FixationReference::Point(point)) => {
                let same = (point - *last).norm() < tolerance;
                // position strategy always follows the latest hit
                *last = point;
                same
            }
            (
                FixationStrategy::Direction { tolerance_deg, smoothing_rate },
                FixationReference::Direction(smoothed),
                FixationReference::Direction(direction),
            ) => {
                let angle = smoothed.dot(&direction).clamp(-1.0, 1.0).acos().to_degrees();
                if angle < tolerance_deg {
                    let t = (smoothing_rate * dt).clamp(0.0, 1.0);
                    *smoothed = smoothed
                        .lerp(&direction, t)
                        .try_normalize(MIN_RAY_LENGTH)
                        .unwrap_or(direction);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };

        if same {
            self.state.elapsed += dt;
            trace!("Holding gaze, dwell {:.3}s", self.state.elapsed);
            FixationOutcome::Continuing
        } else {
            self.state.reference = Some(current);
            self.state.elapsed = 0.0;
            debug!("Gaze moved, dwell restarted");
            FixationOutcome::NewFixation
        }
    }

    /// Clears the reference and zeroes dwell; safe to call repeatedly
    pub fn reset(&mut self) {
        self.state = FixationState::default();
    }

    /// Current fixation state
    pub fn state(&self) -> &FixationState {
        &self.state
    }

    /// Active comparison strategy
    pub fn strategy(&self) -> FixationStrategy {
        self.strategy
    }
}
