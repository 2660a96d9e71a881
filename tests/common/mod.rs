// tests/common/mod.rs
// Shared fixtures for the integration tests: a 60 Hz tick loop over a scripted
// gaze and a simulated wheelchair.
#![allow(dead_code)]

use eos_gaze::sim::{KinematicAgent, ScriptedGaze};
use eos_gaze::{GazeHit, GazeNavConfig, GazeNavigator, NavigationEvent, TickReport};
use nalgebra::Point3;

pub const TICK: f64 = 1.0 / 60.0;

pub type Navigator = GazeNavigator<ScriptedGaze, KinematicAgent>;

pub fn eye() -> Point3<f64> {
    Point3::new(0.0, 1.2, 0.0)
}

pub fn floor(x: f64, z: f64) -> GazeHit {
    GazeHit::new(Point3::new(x, 0.0, z), "Floor", eye())
}

pub fn wall(x: f64, z: f64) -> GazeHit {
    GazeHit::new(Point3::new(x, 1.0, z), "Wall", eye())
}

/// Default settings with the switch already on
pub fn enabled_config() -> GazeNavConfig {
    GazeNavConfig {
        start_enabled: true,
        ..GazeNavConfig::default()
    }
}

/// Agent far from everything that never moves
pub fn parked_agent() -> KinematicAgent {
    KinematicAgent::new(Point3::new(100.0, 0.0, 100.0), 0.0, 0.3)
}

pub fn navigator(config: &GazeNavConfig, gaze: ScriptedGaze, agent: KinematicAgent) -> Navigator {
    GazeNavigator::new(config, Some(gaze), Some(agent)).expect("valid config")
}

/// Advances `ticks` times, stepping the agent after each tick
pub fn run(navigator: &mut Navigator, ticks: usize) -> Vec<TickReport> {
    (0..ticks)
        .map(|_| {
            let report = navigator.advance(TICK);
            if let Some(agent) = navigator.agent_mut() {
                agent.step(TICK);
            }
            report
        })
        .collect()
}

/// Indices of the reports that carry an activation
pub fn activation_ticks(reports: &[TickReport]) -> Vec<usize> {
    reports
        .iter()
        .enumerate()
        .filter(|(_, report)| report.activation().is_some())
        .map(|(tick, _)| tick)
        .collect()
}

/// Every event in tick order
pub fn events(reports: &[TickReport]) -> Vec<NavigationEvent> {
    reports.iter().flat_map(|report| report.events.iter().copied()).collect()
}
