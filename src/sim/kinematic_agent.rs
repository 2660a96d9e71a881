// src/sim/kinematic_agent.rs
// Straight-line stand-in for the path-following agent. It drives toward its
// destination at a constant speed whenever the host steps it, and records every
// command it receives so callers can check what the supervisor asked for.

use log::trace;
use nalgebra::Point3;

use crate::navigation::NavigationAgent;

/// Command received by the simulated agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AgentCommand {
    /// `set_destination` was called
    SetDestination(Point3<f64>),
    /// `set_stopped` was called
    SetStopped(bool),
    /// `reset_path` was called
    ResetPath,
}

/// Constant-speed agent with no obstacles
#[derive(Debug, Clone)]
pub struct KinematicAgent {
    position: Point3<f64>,
    destination: Option<Point3<f64>>,
    stopped: bool,
    blocked: bool,
    speed: f64,
    stopping_distance: f64,
    commands: Vec<AgentCommand>,
}

impl KinematicAgent {
    /// Agent at `position` moving at `speed` units per second
    pub fn new(position: Point3<f64>, speed: f64, stopping_distance: f64) -> Self {
        KinematicAgent {
            position,
            destination: None,
            stopped: false,
            blocked: false,
            speed,
            stopping_distance,
            commands: Vec::new(),
        }
    }

    /// Advances the agent by `dt` seconds
    pub fn step(&mut self, dt: f64) {
        if self.stopped || self.blocked {
            return;
        }
        let Some(destination) = self.destination else {
            return;
        };

        let to_go = destination - self.position;
        let remaining = to_go.norm() - self.stopping_distance;
        if remaining <= 0.0 {
            return;
        }
        let travel = (self.speed * dt).min(remaining);
        self.position += to_go.normalize() * travel;
        trace!("Agent at {:?}", self.position);
    }

    /// Blocks the agent in place, as if no path to the destination exists
    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Current destination, if a path is set
    pub fn destination(&self) -> Option<Point3<f64>> {
        self.destination
    }

    /// Whether motion is paused
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Every command received, oldest first
    pub fn commands(&self) -> &[AgentCommand] {
        &self.commands
    }
}

impl NavigationAgent for KinematicAgent {
    fn set_destination(&mut self, destination: Point3<f64>) {
        self.commands.push(AgentCommand::SetDestination(destination));
        self.destination = Some(destination);
    }

    fn set_stopped(&mut self, stopped: bool) {
        self.commands.push(AgentCommand::SetStopped(stopped));
        self.stopped = stopped;
    }

    fn reset_path(&mut self) {
        self.commands.push(AgentCommand::ResetPath);
        self.destination = None;
    }

    fn current_position(&self) -> Point3<f64> {
        self.position
    }

    fn stopping_distance(&self) -> f64 {
        self.stopping_distance
    }
}
