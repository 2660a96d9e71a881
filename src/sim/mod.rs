//! Simulated collaborators for Eos gaze
//!
//! Stand-ins for the host engine's eye-tracking raycast and path-following agent,
//! used by the demo binary and the integration tests. They speak the same
//! [`GazeProvider`](crate::GazeProvider) and [`NavigationAgent`](crate::NavigationAgent)
//! contracts as the real thing.

mod kinematic_agent;
mod scripted_gaze;

pub use kinematic_agent::{AgentCommand, KinematicAgent};
pub use scripted_gaze::ScriptedGaze;
