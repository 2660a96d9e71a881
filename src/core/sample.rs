// core/sample.rs

//! Wraps the eye-tracking raycast into one gaze sample per tick. The sampler keeps
//! no history; a missing provider is reported once when the sampler is built and
//! every later sample is simply invalid.

use log::{error, trace};
use nalgebra::Point3;

/// One raycast hit reported by the gaze provider
#[derive(Debug, Clone, PartialEq)]
pub struct GazeHit {
    /// World-space point the gaze ray hit
    pub point: Point3<f64>,
    /// Tag of the collider that was hit
    pub surface_tag: String,
    /// World-space origin of the gaze ray
    pub origin: Point3<f64>,
}

impl GazeHit {
    /// Builds a hit from its parts
    pub fn new(point: Point3<f64>, surface_tag: impl Into<String>, origin: Point3<f64>) -> Self {
        GazeHit {
            point,
            surface_tag: surface_tag.into(),
            origin,
        }
    }
}

/// Gaze input for a single tick
#[derive(Debug, Clone, PartialEq)]
pub enum GazeSample {
    /// No usable hit this tick
    Invalid,
    /// The gaze ray hit something
    Valid(GazeHit),
}

impl GazeSample {
    /// Whether the sample carries a hit
    pub fn is_valid(&self) -> bool {
        matches!(self, GazeSample::Valid(_))
    }

    /// The hit, if any
    pub fn hit(&self) -> Option<&GazeHit> {
        match self {
            GazeSample::Valid(hit) => Some(hit),
            GazeSample::Invalid => None,
        }
    }
}

/// Eye or head gaze raycast source
#[cfg_attr(test, mockall::automock)]
pub trait GazeProvider {
    /// Current hit of the gaze ray, or `None` when the ray hits nothing
    fn try_get_hit(&mut self) -> Option<GazeHit>;
}

/// Per-tick passthrough from the gaze provider
pub struct GazeSampler<G> {
    provider: Option<G>,
}

impl<G: GazeProvider> GazeSampler<G> {
    /// Creates a sampler; a missing provider is logged here and never again
    pub fn new(provider: Option<G>) -> Self {
        if provider.is_none() {
            error!("Gaze provider not found; gaze navigation stays inactive");
        }
        GazeSampler { provider }
    }

    /// Samples the provider; always invalid when disabled or unconfigured
    pub fn sample(&mut self, enabled: bool) -> GazeSample {
        if !enabled {
            return GazeSample::Invalid;
        }
        let Some(provider) = self.provider.as_mut() else {
            return GazeSample::Invalid;
        };

        match provider.try_get_hit() {
            Some(hit) => {
                trace!("Gaze hit '{}' at {:?}", hit.surface_tag, hit.point);
                GazeSample::Valid(hit)
            }
            None => GazeSample::Invalid,
        }
    }

    /// Whether a provider was supplied
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Borrow the wrapped provider
    pub fn provider(&self) -> Option<&G> {
        self.provider.as_ref()
    }
}
