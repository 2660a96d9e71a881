// src/navigation/agent.rs
//! Contract for the path-following agent that actually drives the wheelchair.
//! Planning and steering live on the other side of this trait; the supervisor only
//! issues destinations, start/stop requests and polls the agent's position.

use nalgebra::Point3;

/// Path-planning agent that moves the wheelchair
#[cfg_attr(test, mockall::automock)]
pub trait NavigationAgent {
    /// Plans a path to `destination`
    fn set_destination(&mut self, destination: Point3<f64>);

    /// Pauses (`true`) or resumes (`false`) motion along the current path
    fn set_stopped(&mut self, stopped: bool);

    /// Drops the current path
    fn reset_path(&mut self);

    /// Current world-space position of the agent
    fn current_position(&self) -> Point3<f64>;

    /// Radius around the destination the agent considers arrival
    fn stopping_distance(&self) -> f64;
}

/// Stops the agent and clears its path.
pub fn halt<A: NavigationAgent + ?Sized>(agent: &mut A) {
    agent.set_stopped(true);
    agent.reset_path();
}
