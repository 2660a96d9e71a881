//! Eos Gaze - dwell-activated gaze navigation
//!
//! This library turns a continuous eye/head-gaze ray into "go here" commands for an
//! assistive wheelchair: once the user fixates steadily enough, for long enough, on
//! traversable ground, a path-following agent is sent to that point and supervised
//! until it arrives or is cancelled.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod config;
pub mod core;
pub mod navigation;
pub mod sim;

// Re-export commonly used items for easier access
pub use crate::config::{ActivationConfig, FixationStrategy, GazeNavConfig, NavigationConfig};
pub use crate::core::{
    ActivationEvent, ActivationGate, EnableSwitch, FixationOutcome, FixationTracker, GazeHit,
    GazeProvider, GazeSample, GazeSampler,
};
pub use crate::navigation::{
    CancelReason, NavigationAgent, NavigationEvent, NavigationStatus, NavigationSupervisor,
    TaskState,
};

/// Outcome of one call to [`GazeNavigator::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// How the tick's gaze sample was classified
    pub fixation: FixationOutcome,
    /// Activations, arrivals and cancellations, in the order they happened
    pub events: Vec<NavigationEvent>,
}

impl TickReport {
    fn idle() -> Self {
        TickReport {
            fixation: FixationOutcome::Idle,
            events: Vec::new(),
        }
    }

    /// Target of the activation fired this tick, if any
    pub fn activation(&self) -> Option<nalgebra::Point3<f64>> {
        self.events.iter().find_map(|event| match event {
            NavigationEvent::Activated { target } => Some(*target),
            _ => None,
        })
    }
}

/// Combined controller status
#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorStatus {
    /// Enable switch position
    pub enabled: bool,
    /// Whether a gaze provider was supplied
    pub gaze_available: bool,
    /// Whether a fixation is in progress
    pub fixation_active: bool,
    /// Seconds the current fixation has been held
    pub dwell_elapsed: f64,
    /// Whether the current fixation has already activated
    pub activation_latched: bool,
    /// Navigation supervisor status
    pub navigation: NavigationStatus,
}

/// Gaze-dwell navigation controller
///
/// Call [`advance`](Self::advance) once per host frame with the frame duration.
/// Each tick runs the enable switch, gaze sampler, fixation tracker, activation
/// gate and navigation supervisor in that order, so an activation is acted on in
/// the same tick it fires.
pub struct GazeNavigator<G, A> {
    switch: EnableSwitch,
    sampler: GazeSampler<G>,
    tracker: FixationTracker,
    gate: ActivationGate,
    supervisor: NavigationSupervisor<A>,
}

impl<G: GazeProvider, A: NavigationAgent> GazeNavigator<G, A> {
    /// Creates a navigator.
    ///
    /// Missing collaborators are logged once and leave the navigator inert; only an
    /// invalid configuration is an error.
    pub fn new(
        config: &GazeNavConfig,
        provider: Option<G>,
        agent: Option<A>,
    ) -> Result<Self, GazeNavError> {
        config.validate()?;

        let navigator = GazeNavigator {
            switch: EnableSwitch::new(config.start_enabled),
            sampler: GazeSampler::new(provider),
            tracker: FixationTracker::new(config.fixation, config.traversable_tag.clone()),
            gate: ActivationGate::new(config.activation.dwell_threshold),
            supervisor: NavigationSupervisor::new(agent, &config.navigation),
        };
        log::info!(
            "Gaze navigator ready ({:?}, dwell {:.2}s, enabled: {})",
            navigator.tracker.strategy(),
            navigator.gate.dwell_threshold(),
            navigator.switch.is_enabled()
        );
        Ok(navigator)
    }

    /// Runs one tick of `dt` seconds
    pub fn advance(&mut self, dt: f64) -> TickReport {
        if !self.switch.is_enabled() {
            return TickReport::idle();
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let mut events = Vec::new();

        let sample = self.sampler.sample(self.switch.is_enabled());
        let fixation = self.tracker.update(&sample, dt);

        match fixation {
            FixationOutcome::Broken => {
                self.gate.rearm();
                events.extend(self.supervisor.cancel(CancelReason::GazeLost));
            }
            FixationOutcome::Started | FixationOutcome::NewFixation => self.gate.rearm(),
            FixationOutcome::Continuing | FixationOutcome::Idle => {}
        }

        if let Some(hit) = sample.hit() {
            if self.tracker.state().is_active() {
                if let Some(activation) = self.gate.check(self.tracker.state().elapsed(), hit.point) {
                    events.push(NavigationEvent::Activated {
                        target: activation.target,
                    });
                    events.extend(self.supervisor.start(activation.target));
                }
            }
        }

        events.extend(self.supervisor.poll(dt));

        TickReport { fixation, events }
    }

    /// Flips the enable switch.
    ///
    /// Returns the new position and, when switching off stopped a moving task,
    /// its cancellation.
    pub fn toggle_enabled(&mut self) -> (bool, Option<NavigationEvent>) {
        let enabled = self.switch.toggle();
        (enabled, self.switched(enabled))
    }

    /// Moves the enable switch.
    ///
    /// Switching off resets the fixation and cancels navigation before returning;
    /// switching on starts from a clean fixation. Returns the cancellation, if any.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<NavigationEvent> {
        if !self.switch.set(enabled) {
            return None;
        }
        self.switched(enabled)
    }

    fn switched(&mut self, enabled: bool) -> Option<NavigationEvent> {
        self.tracker.reset();
        self.gate.rearm();
        if enabled {
            None
        } else {
            self.supervisor.cancel(CancelReason::Disabled)
        }
    }

    /// Whether gaze navigation is switched on
    pub fn is_enabled(&self) -> bool {
        self.switch.is_enabled()
    }

    /// Status snapshot
    pub fn status(&self) -> NavigatorStatus {
        let fixation = self.tracker.state();
        NavigatorStatus {
            enabled: self.switch.is_enabled(),
            gaze_available: self.sampler.is_available(),
            fixation_active: fixation.is_active(),
            dwell_elapsed: fixation.elapsed(),
            activation_latched: self.gate.is_latched(),
            navigation: self.supervisor.status(),
        }
    }

    /// Borrow the gaze provider
    pub fn provider(&self) -> Option<&G> {
        self.sampler.provider()
    }

    /// Borrow the navigation agent
    pub fn agent(&self) -> Option<&A> {
        self.supervisor.agent()
    }

    /// Mutably borrow the navigation agent, e.g. to step its physics between ticks
    pub fn agent_mut(&mut self) -> Option<&mut A> {
        self.supervisor.agent_mut()
    }
}

/// Eos gaze error types
#[derive(Debug)]
pub enum GazeNavError {
    /// Configuration file could not be read
    Io(String),
    /// Configuration file could not be parsed
    Parse(String),
    /// Configuration value out of range
    InvalidConfig(String),
}

impl std::fmt::Display for GazeNavError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GazeNavError::Io(msg) => write!(f, "I/O error: {}", msg),
            GazeNavError::Parse(msg) => write!(f, "Parse error: {}", msg),
            GazeNavError::InvalidConfig(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GazeNavError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::MockGazeProvider;
    use crate::navigation::agent::MockNavigationAgent;
    use mockall::predicate::eq;
    use nalgebra::Point3;

    fn floor_hit() -> GazeHit {
        GazeHit::new(Point3::new(1.0, 0.0, 3.0), "Floor", Point3::new(0.0, 1.6, 0.0))
    }

    fn enabled_config() -> GazeNavConfig {
        GazeNavConfig {
            start_enabled: true,
            ..GazeNavConfig::default()
        }
    }

    /// Agent that is always far from any destination
    fn distant_agent() -> MockNavigationAgent {
        let mut agent = MockNavigationAgent::new();
        agent.expect_set_stopped().return_const(());
        agent.expect_reset_path().return_const(());
        agent.expect_set_destination().return_const(());
        agent.expect_stopping_distance().return_const(0.5);
        agent
            .expect_current_position()
            .return_const(Point3::new(50.0, 0.0, 50.0));
        agent
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GazeNavConfig {
            activation: ActivationConfig {
                dwell_threshold: -1.0,
            },
            ..GazeNavConfig::default()
        };
        let result = GazeNavigator::<MockGazeProvider, MockNavigationAgent>::new(&config, None, None);
        assert!(matches!(result, Err(GazeNavError::InvalidConfig(_))));
    }

    #[test]
    fn disabled_navigator_never_samples() {
        let mut provider = MockGazeProvider::new();
        provider.expect_try_get_hit().times(0);
        let mut navigator =
            GazeNavigator::new(&GazeNavConfig::default(), Some(provider), Some(distant_agent())).unwrap();

        for _ in 0..10 {
            assert_eq!(navigator.advance(0.5), TickReport::idle());
        }
    }

    #[test]
    fn activation_is_acted_on_in_the_same_tick() {
        let mut provider = MockGazeProvider::new();
        provider.expect_try_get_hit().returning(|| Some(floor_hit()));
        let mut agent = MockNavigationAgent::new();
        agent.expect_set_stopped().return_const(());
        agent.expect_reset_path().return_const(());
        agent
            .expect_set_destination()
            .with(eq(floor_hit().point))
            .times(1)
            .return_const(());
        agent.expect_stopping_distance().return_const(0.5);
        agent
            .expect_current_position()
            .return_const(Point3::new(50.0, 0.0, 50.0));
        let mut navigator = GazeNavigator::new(&enabled_config(), Some(provider), Some(agent)).unwrap();

        navigator.advance(1.0);
        navigator.advance(1.0);
        let report = navigator.advance(1.0);

        assert_eq!(report.activation(), Some(floor_hit().point));
        assert_eq!(navigator.status().navigation.task_state, TaskState::Moving);
    }

    #[test]
    fn broken_fixation_cancels_moving_task() {
        let mut provider = MockGazeProvider::new();
        let mut calls = 0;
        provider.expect_try_get_hit().returning(move || {
            calls += 1;
            if calls <= 3 { Some(floor_hit()) } else { None }
        });
        let mut navigator =
            GazeNavigator::new(&enabled_config(), Some(provider), Some(distant_agent())).unwrap();

        for _ in 0..3 {
            navigator.advance(1.0);
        }
        assert_eq!(navigator.status().navigation.task_state, TaskState::Moving);

        let report = navigator.advance(1.0);
        assert_eq!(report.fixation, FixationOutcome::Broken);
        assert_eq!(
            report.events,
            vec![NavigationEvent::Cancelled {
                destination: floor_hit().point,
                reason: CancelReason::GazeLost
            }]
        );
        let status = navigator.status();
        assert_eq!(status.navigation.task_state, TaskState::Idle);
        assert!(!status.activation_latched);
        assert_eq!(status.dwell_elapsed, 0.0);
    }

    #[test]
    fn disabling_cancels_and_resets_synchronously() {
        let mut provider = MockGazeProvider::new();
        provider.expect_try_get_hit().returning(|| Some(floor_hit()));
        let mut navigator =
            GazeNavigator::new(&enabled_config(), Some(provider), Some(distant_agent())).unwrap();
        for _ in 0..4 {
            navigator.advance(1.0);
        }
        assert_eq!(navigator.status().navigation.task_state, TaskState::Moving);

        let (enabled, cancelled) = navigator.toggle_enabled();
        assert!(!enabled);
        assert_eq!(
            cancelled,
            Some(NavigationEvent::Cancelled {
                destination: floor_hit().point,
                reason: CancelReason::Disabled
            })
        );

        let status = navigator.status();
        assert!(!status.enabled);
        assert_eq!(status.navigation.task_state, TaskState::Idle);
        assert_eq!(status.navigation.last_outcome, Some(TaskState::Cancelled));
        assert_eq!(status.dwell_elapsed, 0.0);
        assert!(!status.fixation_active);
        assert!(!status.activation_latched);
    }

    #[test]
    fn re_enabling_starts_from_clean_state() {
        let mut provider = MockGazeProvider::new();
        provider.expect_try_get_hit().returning(|| Some(floor_hit()));
        let mut navigator =
            GazeNavigator::new(&enabled_config(), Some(provider), Some(distant_agent())).unwrap();
        navigator.advance(1.0);
        navigator.advance(1.5);

        navigator.set_enabled(false);
        navigator.set_enabled(true);

        assert_eq!(navigator.advance(1.0).fixation, FixationOutcome::Started);
        assert_eq!(navigator.status().dwell_elapsed, 0.0);
    }

    #[test]
    fn missing_collaborators_degrade_quietly() {
        let mut navigator =
            GazeNavigator::<MockGazeProvider, MockNavigationAgent>::new(&enabled_config(), None, None)
                .unwrap();
        for _ in 0..5 {
            let report = navigator.advance(1.0);
            assert_eq!(report.fixation, FixationOutcome::Broken);
            assert!(report.events.is_empty());
        }
        let status = navigator.status();
        assert!(!status.gaze_available);
        assert!(!status.navigation.agent_available);
    }

    #[test]
    fn bad_tick_durations_count_as_zero() {
        let mut provider = MockGazeProvider::new();
        provider.expect_try_get_hit().returning(|| Some(floor_hit()));
        let mut navigator =
            GazeNavigator::new(&enabled_config(), Some(provider), Some(distant_agent())).unwrap();
        navigator.advance(0.1);
        navigator.advance(f64::NAN);
        navigator.advance(-3.0);
        navigator.advance(f64::INFINITY);
        assert_eq!(navigator.status().dwell_elapsed, 0.0);
    }
}
