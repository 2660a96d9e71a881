// src/main.rs
// Demo driver for Eos gaze: runs a scripted gaze session against a simulated
// wheelchair at 60 Hz and logs every activation, arrival and cancellation.
//
// Usage: eos-gaze [config.yaml]   (RUST_LOG=info for the event log)

use eos_gaze::sim::{KinematicAgent, ScriptedGaze};
use eos_gaze::{GazeHit, GazeNavConfig, GazeNavigator, NavigationAgent, NavigationEvent};
use log::{info, warn};
use nalgebra::Point3;
use std::error::Error;
use std::path::Path;

const DEFAULT_CONFIG: &str = "config/gaze_nav.yaml";
const TICK: f64 = 1.0 / 60.0;

/// Main function to load configuration and replay the demo session.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting Eos gaze navigation demo...");

    let config = load_config()?;

    let eye = Point3::new(0.0, 1.2, 0.0);
    let first_target = Point3::new(0.0, 0.0, 2.0);
    let second_target = Point3::new(1.5, 0.0, 3.0);
    let gaze = ScriptedGaze::new()
        // look at a spot on the floor long enough to activate
        .hold(GazeHit::new(first_target, "Floor", eye), 300)
        // glance at a wall: dwell resets and the wheelchair stops
        .hold(GazeHit::new(Point3::new(0.0, 1.0, 5.0), "Wall", eye), 30)
        // dwell on a second spot and let the wheelchair get there
        .hold(GazeHit::new(second_target, "Floor", eye), 360)
        .gap(30);
    let agent = KinematicAgent::new(Point3::origin(), 1.0, 0.3);

    let mut navigator = GazeNavigator::new(&config, Some(gaze), Some(agent))?;
    if !navigator.is_enabled() {
        navigator.set_enabled(true);
    }

    let mut tick = 0usize;
    while navigator.provider().map_or(0, |gaze| gaze.remaining()) > 0 {
        let report = navigator.advance(TICK);
        for event in &report.events {
            log_event(tick, event);
        }
        if let Some(agent) = navigator.agent_mut() {
            agent.step(TICK);
        }
        tick += 1;
    }

    if let Some(event) = navigator.set_enabled(false) {
        log_event(tick, &event);
    }

    let status = navigator.status();
    info!(
        "Demo completed after {} ticks: {} moves started, {} arrived, {} cancelled",
        tick,
        status.navigation.tasks_started,
        status.navigation.arrivals,
        status.navigation.cancellations
    );
    if let Some(agent) = navigator.agent() {
        info!("Wheelchair finished at {:?}", agent.current_position());
    }
    Ok(())
}

/// Loads the config named on the command line, the default file, or built-in defaults.
fn load_config() -> Result<GazeNavConfig, Box<dyn Error>> {
    if let Some(path) = std::env::args().nth(1) {
        return Ok(GazeNavConfig::from_yaml_file(path)?);
    }
    if Path::new(DEFAULT_CONFIG).exists() {
        return Ok(GazeNavConfig::from_yaml_file(DEFAULT_CONFIG)?);
    }
    warn!("No config file found, using defaults");
    Ok(GazeNavConfig {
        start_enabled: true,
        ..GazeNavConfig::default()
    })
}

fn log_event(tick: usize, event: &NavigationEvent) {
    match event {
        NavigationEvent::Activated { target } => info!("[tick {}] activated: {:?}", tick, target),
        NavigationEvent::Arrived { destination } => info!("[tick {}] arrived: {:?}", tick, destination),
        NavigationEvent::Cancelled { destination, reason } => {
            info!("[tick {}] cancelled move to {:?}: {:?}", tick, destination, reason)
        }
    }
}
