// core/mod.rs

//! Declares and exposes the gaze pipeline: sampling the eye-tracking raycast,
//! tracking fixations, gating activations and the enable switch. Each stage is
//! independent so the navigator can run them in a fixed order every tick.

pub mod activation;
pub mod fixation;
pub mod sample;
pub mod state;

pub use activation::{ActivationEvent, ActivationGate};
pub use fixation::{FixationOutcome, FixationReference, FixationState, FixationTracker};
pub use sample::{GazeHit, GazeProvider, GazeSample, GazeSampler};
pub use state::EnableSwitch;
