// ABOUTME: Playback cursor state machine for replaying a recorded route
// ABOUTME: Cursor starts at index 1 on play and stops itself on reaching the last sample
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fittrack_core::constants::playback::{MIN_SAMPLES, START_CURSOR};
use serde::{Deserialize, Serialize};

/// Replay position over a route of `len` samples
///
/// `Stopped -> Playing -> Stopped`. Stopping never rewinds the cursor;
/// starting again always resets it to index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    cursor_index: usize,
    is_playing: bool,
}

impl PlaybackState {
    /// Index of the sample the replay has reached
    #[must_use]
    pub const fn cursor_index(&self) -> usize {
        self.cursor_index
    }

    /// Whether the replay is advancing
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Start a replay over `len` samples
    ///
    /// No-op when fewer than two samples exist or a replay is already
    /// running. With exactly two samples the cursor lands on the last index
    /// and the replay completes immediately. Returns whether it is now playing.
    pub fn play(&mut self, len: usize) -> bool {
        if len < MIN_SAMPLES || self.is_playing {
            return self.is_playing;
        }
        self.cursor_index = START_CURSOR;
        self.is_playing = self.cursor_index < len - 1;
        self.is_playing
    }

    /// Advance one step; returns whether the replay is still running
    pub fn tick(&mut self, len: usize) -> bool {
        if !self.is_playing {
            return false;
        }
        if self.cursor_index + 1 >= len {
            self.is_playing = false;
            return false;
        }
        self.cursor_index += 1;
        if self.cursor_index + 1 >= len {
            self.is_playing = false;
        }
        self.is_playing
    }

    /// Stop without rewinding
    pub fn stop(&mut self) {
        self.is_playing = false;
    }

    /// Stop and rewind to the start
    pub fn rewind(&mut self) {
        *self = Self::default();
    }
}
