// core/activation.rs

//! Turns accumulated dwell into a single edge-triggered activation. The latch is
//! only re-armed when a fixation starts over; finishing a move does not re-arm it,
//! so holding perfectly still after arrival never re-triggers motion.

use log::info;
use nalgebra::Point3;

/// Slack on the threshold comparison so summed tick durations land on it
const DWELL_EPSILON: f64 = 1e-9;

/// Request to drive to a gazed-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationEvent {
    /// Point the user fixated on
    pub target: Point3<f64>,
}

/// Edge-triggered dwell threshold with a one-shot latch
#[derive(Debug, Clone)]
pub struct ActivationGate {
    dwell_threshold: f64,
    fired: bool,
}

impl ActivationGate {
    /// Creates an armed gate
    pub fn new(dwell_threshold: f64) -> Self {
        ActivationGate {
            dwell_threshold,
            fired: false,
        }
    }

    /// Fires once when `elapsed` first reaches the threshold for this fixation
    pub fn check(&mut self, elapsed: f64, target: Point3<f64>) -> Option<ActivationEvent> {
        if self.fired || elapsed + DWELL_EPSILON < self.dwell_threshold {
            return None;
        }

        self.fired = true;
        info!("Gaze held for {:.2}s, activating move to {:?}", elapsed, target);
        Some(ActivationEvent { target })
    }

    /// Re-arms the latch for a new fixation
    pub fn rearm(&mut self) {
        self.fired = false;
    }

    /// Whether the current fixation has already fired
    pub fn is_latched(&self) -> bool {
        self.fired
    }

    /// Seconds of dwell required to fire
    pub fn dwell_threshold(&self) -> f64 {
        self.dwell_threshold
    }
}
