//! Navigation supervision for Eos gaze
//!
//! This module owns the single in-flight move command. Activations start a task
//! (superseding any task already moving), the task is polled once per tick until
//! the agent reports arrival, and resets or switch-offs cancel it immediately.

pub mod agent;

use log::{debug, error, info, warn};
use nalgebra::Point3;

pub use agent::{halt, NavigationAgent};

use crate::config::NavigationConfig;

/// Lifecycle of a navigation task
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskState {
    /// No task
    Idle,
    /// Agent is driving toward the destination
    Moving,
    /// Agent reached the destination
    Arrived,
    /// Task was stopped before arrival
    Cancelled,
}

/// Why a moving task was cancelled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CancelReason {
    /// A newer activation replaced it
    Superseded,
    /// The gaze left traversable ground or tracking was lost
    GazeLost,
    /// The enable switch was turned off
    Disabled,
    /// The task exceeded the configured stall timeout
    Stalled,
}

/// Something observable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationEvent {
    /// Dwell threshold reached; a move was requested
    Activated {
        /// Point the user fixated on
        target: Point3<f64>,
    },
    /// The agent reached the destination
    Arrived {
        /// Destination of the finished task
        destination: Point3<f64>,
    },
    /// A moving task was abandoned
    Cancelled {
        /// Destination of the abandoned task
        destination: Point3<f64>,
        /// Why it was abandoned
        reason: CancelReason,
    },
}

/// Navigation status snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationStatus {
    /// Whether an agent was supplied
    pub agent_available: bool,
    /// State of the current task (`Idle` when there is none)
    pub task_state: TaskState,
    /// Destination of the current task
    pub destination: Option<Point3<f64>>,
    /// How the most recent task ended
    pub last_outcome: Option<TaskState>,
    /// Tasks started since creation
    pub tasks_started: u64,
    /// Tasks that reached their destination
    pub arrivals: u64,
    /// Tasks cancelled for any reason
    pub cancellations: u64,
}

/// The move command in flight; only `Moving` tasks occupy the slot
#[derive(Debug, Clone)]
struct NavigationTask {
    destination: Point3<f64>,
    /// Seconds spent in `Moving`
    moving_for: f64,
}

/// Single-flight owner of the move command
pub struct NavigationSupervisor<A> {
    agent: Option<A>,
    arrival_slack: f64,
    stall_timeout: Option<f64>,
    task: Option<NavigationTask>,
    last_outcome: Option<TaskState>,
    tasks_started: u64,
    arrivals: u64,
    cancellations: u64,
}

impl<A: NavigationAgent> NavigationSupervisor<A> {
    /// Creates an idle supervisor and halts the agent so it starts at rest
    pub fn new(agent: Option<A>, config: &NavigationConfig) -> Self {
        let mut agent = agent;
        match agent.as_mut() {
            Some(agent) => {
                info!("Navigation agent found, stopping movement at start");
                halt(agent);
            }
            None => error!("Navigation agent not assigned; activations will be ignored"),
        }

        NavigationSupervisor {
            agent,
            arrival_slack: config.arrival_slack,
            stall_timeout: config.stall_timeout,
            task: None,
            last_outcome: None,
            tasks_started: 0,
            arrivals: 0,
            cancellations: 0,
        }
    }

    /// Starts a task toward `destination`, cancelling the one in flight.
    ///
    /// Returns the cancellation of the superseded task, if there was one.
    pub fn start(&mut self, destination: Point3<f64>) -> Option<NavigationEvent> {
        if self.agent.is_none() {
            debug!("No navigation agent, ignoring move to {:?}", destination);
            return None;
        }

        let superseded = self.cancel(CancelReason::Superseded);

        if let Some(agent) = self.agent.as_mut() {
            agent.set_stopped(false);
            agent.set_destination(destination);
        }
        self.task = Some(NavigationTask {
            destination,
            moving_for: 0.0,
        });
        self.tasks_started += 1;
        info!("Moving wheelchair to {:?}", destination);

        superseded
    }

    /// Checks the moving task for arrival or stall; call once per tick
    pub fn poll(&mut self, dt: f64) -> Option<NavigationEvent> {
        let (Some(task), Some(agent)) = (self.task.as_mut(), self.agent.as_ref()) else {
            return None;
        };

        task.moving_for += dt;
        let destination = task.destination;
        let distance = (agent.current_position() - destination).norm();
        let arrival_radius = agent.stopping_distance() + self.arrival_slack;

        if distance <= arrival_radius {
            info!("Wheelchair has reached the destination {:?}", destination);
            self.finish(TaskState::Arrived);
            self.arrivals += 1;
            return Some(NavigationEvent::Arrived { destination });
        }

        if let Some(timeout) = self.stall_timeout {
            if task.moving_for >= timeout {
                warn!(
                    "No arrival at {:?} after {:.1}s ({:.2} away), abandoning move",
                    destination, task.moving_for, distance
                );
                return self.cancel(CancelReason::Stalled);
            }
        }

        None
    }

    /// Stops the agent and discards the moving task; a no-op when idle
    pub fn cancel(&mut self, reason: CancelReason) -> Option<NavigationEvent> {
        let destination = self.task.as_ref()?.destination;
        self.finish(TaskState::Cancelled);
        self.cancellations += 1;
        info!("Move to {:?} cancelled ({:?})", destination, reason);
        Some(NavigationEvent::Cancelled { destination, reason })
    }

    /// Current task state
    pub fn state(&self) -> TaskState {
        self.task.as_ref().map_or(TaskState::Idle, |_| TaskState::Moving)
    }

    /// Destination of the current task
    pub fn destination(&self) -> Option<Point3<f64>> {
        self.task.as_ref().map(|task| task.destination)
    }

    /// Whether an agent was supplied
    pub fn is_available(&self) -> bool {
        self.agent.is_some()
    }

    /// Borrow the agent
    pub fn agent(&self) -> Option<&A> {
        self.agent.as_ref()
    }

    /// Mutably borrow the agent, e.g. to step a simulated one
    pub fn agent_mut(&mut self) -> Option<&mut A> {
        self.agent.as_mut()
    }

    /// Status snapshot
    pub fn status(&self) -> NavigationStatus {
        NavigationStatus {
            agent_available: self.is_available(),
            task_state: self.state(),
            destination: self.destination(),
            last_outcome: self.last_outcome,
            tasks_started: self.tasks_started,
            arrivals: self.arrivals,
            cancellations: self.cancellations,
        }
    }

    /// Halts the agent, records the outcome and returns to idle
    fn finish(&mut self, outcome: TaskState) {
        if let Some(agent) = self.agent.as_mut() {
            halt(agent);
        }
        if let Some(task) = self.task.take() {
            debug!("Task to {:?} ended as {:?}", task.destination, outcome);
        }
        self.last_outcome = Some(outcome);
    }
}
