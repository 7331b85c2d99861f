// ABOUTME: Device positioning abstraction feeding GPS fixes into commute sessions
// ABOUTME: PositionSource and NetworkProbe traits plus a channel-backed source for replays and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Positioning
//!
//! A [`PositionSource`] reports whether positioning exists on this device and
//! opens watches that deliver fixes over a bounded channel. Dropping the
//! [`PositionWatch`] closes the channel, which is how the tracker cancels a
//! subscription.

use async_trait::async_trait;
use fittrack_core::constants::positioning::{
    FIX_CHANNEL_CAPACITY, HIGH_ACCURACY, MAXIMUM_AGE_MS, ONE_SHOT_TIMEOUT_MS, WATCH_TIMEOUT_MS,
};
use fittrack_core::errors::{AppError, AppResult, ErrorCode};
use fittrack_core::models::{GpsSample, NetworkClass};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::time::timeout;
use tracing::debug;

/// Whether the device exposes a positioning API at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositioningCapability {
    /// Fixes can be requested
    Available,
    /// No positioning API; tracking stays disabled
    Unavailable,
}

/// Options passed to a position watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Request a high-accuracy fix
    pub high_accuracy: bool,
    /// Maximum wait for a fix in milliseconds
    pub timeout_ms: u64,
    /// Maximum age of a cached fix in milliseconds
    pub maximum_age_ms: u64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: HIGH_ACCURACY,
            timeout_ms: WATCH_TIMEOUT_MS,
            maximum_age_ms: MAXIMUM_AGE_MS,
        }
    }
}

impl WatchOptions {
    /// Options for a single fix lookup, which tolerates a longer wait
    #[must_use]
    pub fn one_shot() -> Self {
        Self {
            timeout_ms: ONE_SHOT_TIMEOUT_MS,
            ..Self::default()
        }
    }
}

/// A raw fix from the positioning API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Capture time in Unix milliseconds
    pub captured_at_millis: i64,
}

impl PositionFix {
    /// Create a fix
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, captured_at_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            captured_at_millis,
        }
    }

    /// Combine with the current network reading into a GPS sample
    #[must_use]
    pub fn into_sample(self, network: Option<NetworkInfo>) -> GpsSample {
        let sample = GpsSample::new(self.latitude, self.longitude, self.captured_at_millis);
        match network {
            Some(info) => sample.with_network(info.class, info.downlink_mbps),
            None => sample,
        }
    }
}

/// Failure reported by a position watch
///
/// None of these end a watch: the next fix may still arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositioningError {
    /// The user declined location access
    #[error("Location access denied. Please enable location permissions for this site and try again.")]
    PermissionDenied,
    /// The device could not determine a position
    #[error("Location information is unavailable. Please check your device's location settings.")]
    PositionUnavailable,
    /// No fix arrived within the watch timeout
    #[error("Location request timed out. Please try again.")]
    Timeout,
}

impl From<PositioningError> for AppError {
    fn from(error: PositioningError) -> Self {
        let code = match error {
            PositioningError::PermissionDenied => ErrorCode::PermissionDenied,
            PositioningError::PositionUnavailable => ErrorCode::PositionUnavailable,
            PositioningError::Timeout => ErrorCode::PositionTimeout,
        };
        Self::new(code, error.to_string())
    }
}

/// Result delivered for each watch event
pub type FixResult = Result<PositionFix, PositioningError>;

/// An open position subscription
///
/// Dropping the watch cancels it.
#[derive(Debug)]
pub struct PositionWatch {
    rx: mpsc::Receiver<FixResult>,
}

impl PositionWatch {
    /// Wrap the receiving end of a fix channel
    #[must_use]
    pub const fn new(rx: mpsc::Receiver<FixResult>) -> Self {
        Self { rx }
    }

    /// Wait for the next fix or error; `None` once the source closes
    pub async fn next(&mut self) -> Option<FixResult> {
        self.rx.recv().await
    }
}

/// Provider of device position fixes
#[async_trait]
pub trait PositionSource: Send + Sync {
    /// Whether positioning exists on this device
    fn capability(&self) -> PositioningCapability;

    /// Open a continuous watch
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` when the device has no positioning API
    async fn watch(&self, options: WatchOptions) -> AppResult<PositionWatch>;

    /// Resolve a single fix, waiting at most `options.timeout_ms`
    ///
    /// # Errors
    ///
    /// Returns the positioning error reported by the watch, `PositionTimeout`
    /// when nothing arrives in time, or `PositionUnavailable` if the source
    /// closes without a fix
    async fn current_position(&self, options: WatchOptions) -> AppResult<PositionFix> {
        let mut watch = self.watch(options).await?;
        match timeout(Duration::from_millis(options.timeout_ms), watch.next()).await {
            Ok(Some(Ok(fix))) => Ok(fix),
            Ok(Some(Err(error))) => Err(error.into()),
            Ok(None) => Err(PositioningError::PositionUnavailable.into()),
            Err(_) => Err(PositioningError::Timeout.into()),
        }
    }
}

/// Link quality reading at the moment a fix arrives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Effective connection class
    pub class: NetworkClass,
    /// Downlink estimate in Mbps
    pub downlink_mbps: f64,
}

/// Source of network link information
///
/// `None` means the device has no network information API; samples are then
/// recorded with an unknown class.
pub trait NetworkProbe: Send + Sync {
    /// Current reading
    fn current(&self) -> Option<NetworkInfo>;
}

/// Probe returning a fixed reading
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticNetworkProbe {
    reading: Option<NetworkInfo>,
}

impl StaticNetworkProbe {
    /// Probe that always reports `class` at `downlink_mbps`
    #[must_use]
    pub const fn new(class: NetworkClass, downlink_mbps: f64) -> Self {
        Self {
            reading: Some(NetworkInfo {
                class,
                downlink_mbps,
            }),
        }
    }

    /// Probe for devices without network information
    #[must_use]
    pub const fn absent() -> Self {
        Self { reading: None }
    }
}

impl NetworkProbe for StaticNetworkProbe {
    fn current(&self) -> Option<NetworkInfo> {
        self.reading
    }
}

/// Position source fed by hand
///
/// Replays, the command-line client and tests push fixes into whichever
/// watch is currently open. Opening a new watch replaces the previous one.
#[derive(Debug, Clone)]
pub struct ChannelPositionSource {
    capability: PositioningCapability,
    active: Arc<Mutex<Option<mpsc::Sender<FixResult>>>>,
}

impl Default for ChannelPositionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelPositionSource {
    /// Source on a device with positioning
    #[must_use]
    pub fn new() -> Self {
        Self {
            capability: PositioningCapability::Available,
            active: Arc::new(Mutex::new(None)),
        }
    }

    /// Source on a device without positioning
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            capability: PositioningCapability::Unavailable,
            ..Self::new()
        }
    }

    /// Deliver a fix to the open watch; returns whether anyone received it
    pub async fn push(&self, fix: PositionFix) -> bool {
        self.deliver(Ok(fix)).await
    }

    /// Deliver a positioning error to the open watch
    pub async fn push_error(&self, error: PositioningError) -> bool {
        self.deliver(Err(error)).await
    }

    /// Whether a watch is open and its receiver still alive
    pub async fn is_watching(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .is_some_and(|tx| !tx.is_closed())
    }

    async fn deliver(&self, event: FixResult) -> bool {
        let sender = self.active.lock().await.clone();
        match sender {
            Some(tx) => tx.send(event).await.is_ok(),
            None => {
                debug!("Fix dropped, no watch open");
                false
            }
        }
    }
}

#[async_trait]
impl PositionSource for ChannelPositionSource {
    fn capability(&self) -> PositioningCapability {
        self.capability
    }

    async fn watch(&self, options: WatchOptions) -> AppResult<PositionWatch> {
        if self.capability == PositioningCapability::Unavailable {
            return Err(AppError::capability_unavailable(
                "Geolocation is not supported by this device.",
            ));
        }
        debug!(?options, "Opening position watch");
        let (tx, rx) = mpsc::channel(FIX_CHANNEL_CAPACITY);
        *self.active.lock().await = Some(tx);
        Ok(PositionWatch::new(rx))
    }
}
