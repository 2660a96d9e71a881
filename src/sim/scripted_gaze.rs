// src/sim/scripted_gaze.rs
// Replays a fixed per-tick script of gaze hits. Each call to `try_get_hit`
// consumes one frame; once the script runs out the gaze hits nothing.

use std::collections::VecDeque;

use crate::core::{GazeHit, GazeProvider};

/// Gaze provider driven by a prepared script of frames
#[derive(Debug, Clone, Default)]
pub struct ScriptedGaze {
    frames: VecDeque<Option<GazeHit>>,
    consumed: usize,
}

impl ScriptedGaze {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `ticks` frames that all report `hit`
    pub fn hold(mut self, hit: GazeHit, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat(Some(hit)).take(ticks));
        self
    }

    /// Appends `ticks` frames with no hit
    pub fn gap(mut self, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat(None).take(ticks));
        self
    }

    /// Appends a single frame
    pub fn push(&mut self, frame: Option<GazeHit>) {
        self.frames.push_back(frame);
    }

    /// Frames not yet replayed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Frames replayed so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl GazeProvider for ScriptedGaze {
    fn try_get_hit(&mut self) -> Option<GazeHit> {
        let frame = self.frames.pop_front()?;
        self.consumed += 1;
        frame
    }
}
