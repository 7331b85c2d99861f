// ABOUTME: Commute tracking sessions and route playback
// ABOUTME: Pure state machines plus the async tracker that drives them from a position source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Replay cursor over a recorded route
pub mod playback;
/// Route files and replaying them through a tracker
pub mod replay;
/// Commute session state machine
pub mod state;
/// Task-driven tracker wiring positioning, persistence and playback ticks
pub mod tracker;

pub use playback::PlaybackState;
pub use replay::{load_samples, replay_route};
pub use state::{CommuteSession, TrackingState};
pub use tracker::{CommuteTracker, TrackerOptions};
