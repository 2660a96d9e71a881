// core/state.rs

//! Process-wide on/off switch for gaze navigation, flipped by an external control
//! such as a Start/Stop button. The switch only records the state; the navigator
//! performs the reset and cancellation that must accompany a switch-off.

use log::info;

/// Gaze navigation enable flag
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnableSwitch {
    enabled: bool,
}

impl EnableSwitch {
    /// Creates a switch in the given position
    pub fn new(enabled: bool) -> Self {
        EnableSwitch { enabled }
    }

    /// Flips the switch and returns the new position
    pub fn toggle(&mut self) -> bool {
        self.set(!self.enabled);
        self.enabled
    }

    /// Moves the switch; returns true when the position actually changed
    pub fn set(&mut self, enabled: bool) -> bool {
        if self.enabled == enabled {
            return false;
        }
        self.enabled = enabled;
        info!("{}", if enabled { "Movement Enabled" } else { "Movement Disabled" });
        true
    }

    /// Current position
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
