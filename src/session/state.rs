// ABOUTME: Commute session state machine owning the samples of one tracking run
// ABOUTME: Tracking on/off, visibility suspension and derived route metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::GpsSample;
use fittrack_metrics::{elapsed_seconds, route_summary, total_distance_km, RouteSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::playback::PlaybackState;
use crate::positioning::PositioningCapability;

/// Whether fixes are being collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingState {
    /// Not collecting fixes
    #[default]
    Idle,
    /// Appending every received fix
    Tracking,
}

/// One tracking run and its replay state
///
/// Samples are appended in arrival order, never edited, and survive
/// `Tracking -> Idle` until the next session starts. Distance and duration
/// are folded from the samples on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommuteSession {
    samples: Vec<GpsSample>,
    tracking: TrackingState,
    playback: PlaybackState,
}

impl CommuteSession {
    /// Empty idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new tracking run
    ///
    /// Clears the previous run's samples and replay. Calling `start` while
    /// already tracking keeps the current run.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` and stays idle when the device has no
    /// positioning
    pub fn start(&mut self, capability: PositioningCapability) -> AppResult<()> {
        if capability == PositioningCapability::Unavailable {
            return Err(AppError::capability_unavailable(
                "Geolocation is not supported by this device.",
            ));
        }
        if self.is_tracking() {
            debug!("start ignored, session already tracking");
            return Ok(());
        }
        self.reset();
        self.tracking = TrackingState::Tracking;
        info!("Commute tracking started");
        Ok(())
    }

    /// Append a fix; ignored unless tracking. Returns whether it was appended.
    pub fn on_fix_received(&mut self, sample: GpsSample) -> bool {
        if !self.is_tracking() {
            debug!("Fix ignored, session is idle");
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Stop collecting fixes; samples are kept
    pub fn stop(&mut self) {
        if self.is_tracking() {
            info!(points = self.samples.len(), "Commute tracking stopped");
        }
        self.tracking = TrackingState::Idle;
    }

    /// Discard all samples and rewind playback
    pub fn reset(&mut self) {
        self.samples.clear();
        self.playback.rewind();
    }

    /// Apply host visibility
    ///
    /// Losing visibility forces tracking and playback off. Regaining it
    /// resumes nothing.
    pub fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.stop();
            self.playback.stop();
        }
    }

    /// Start replaying the recorded route; returns whether it is playing
    pub fn play(&mut self) -> bool {
        self.playback.play(self.samples.len())
    }

    /// Advance the replay one step; returns whether it is still playing
    pub fn tick_playback(&mut self) -> bool {
        self.playback.tick(self.samples.len())
    }

    /// Stop the replay without rewinding
    pub fn stop_playback(&mut self) {
        self.playback.stop();
    }

    /// Samples in arrival order
    #[must_use]
    pub fn samples(&self) -> &[GpsSample] {
        &self.samples
    }

    /// Current tracking state
    #[must_use]
    pub const fn tracking_state(&self) -> TrackingState {
        self.tracking
    }

    /// Whether fixes are being appended
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.tracking == TrackingState::Tracking
    }

    /// Replay state
    #[must_use]
    pub const fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Whether the replay is running
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    /// Most recent sample
    #[must_use]
    pub fn last_sample(&self) -> Option<&GpsSample> {
        self.samples.last()
    }

    /// Great-circle distance of the route so far
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        total_distance_km(&self.samples)
    }

    /// Seconds between first and last sample
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        elapsed_seconds(&self.samples)
    }

    /// Point count, distance and duration together
    #[must_use]
    pub fn summary(&self) -> RouteSummary {
        route_summary(&self.samples)
    }
}
