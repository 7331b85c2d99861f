// ABOUTME: Async commute tracker driving a CommuteSession from a position source
// ABOUTME: Owns the watch and playback tasks, persists each fix fire-and-forget, aborts on drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Commute tracker
//!
//! The tracker is the only writer of its session. A watch task appends each
//! fix in arrival order and hands a copy to a detached persistence task per
//! sample. Persistence failures are logged and surfaced as one notice each;
//! the in-memory sample is never rolled back and the write is never retried.
//!
//! Playback runs on a separate interval task. Stopping tracking, stopping
//! playback, hiding the host surface and dropping the tracker each abort the
//! affected tasks.

use super::state::CommuteSession;
use crate::config::AppConfig;
use crate::notices::{Notice, NoticeSender};
use crate::positioning::{NetworkProbe, PositionSource, PositionWatch, WatchOptions};
use crate::store::{CollectionPath, DocumentStore};
use fittrack_core::constants::{playback::DEFAULT_TICK_MS, store::COMMUTES_COLLECTION};
use fittrack_core::errors::AppResult;
use fittrack_core::models::{AuthUser, GpsSample};
use fittrack_metrics::RouteSummary;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Cadence and positioning options for a tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerOptions {
    /// Options for the position watch
    pub watch: WatchOptions,
    /// Interval between playback cursor advances
    pub playback_tick: Duration,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            watch: WatchOptions::default(),
            playback_tick: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl TrackerOptions {
    /// Options from application settings
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            playback_tick: config.playback_tick(),
            ..Self::default()
        }
    }
}

/// Collaborators shared with the watch task
#[derive(Clone)]
struct WatchContext {
    session: Arc<Mutex<CommuteSession>>,
    network: Arc<dyn NetworkProbe>,
    store: Arc<dyn DocumentStore>,
    user: Option<AuthUser>,
    notices: NoticeSender,
}

/// Drives one commute session
pub struct CommuteTracker {
    session: Arc<Mutex<CommuteSession>>,
    positions: Arc<dyn PositionSource>,
    network: Arc<dyn NetworkProbe>,
    store: Arc<dyn DocumentStore>,
    user: Option<AuthUser>,
    notices: NoticeSender,
    options: TrackerOptions,
    watch_task: Option<JoinHandle<()>>,
    playback_task: Option<JoinHandle<()>>,
}

impl CommuteTracker {
    /// Tracker with default options and no signed-in user
    #[must_use]
    pub fn new(
        positions: Arc<dyn PositionSource>,
        network: Arc<dyn NetworkProbe>,
        store: Arc<dyn DocumentStore>,
        notices: NoticeSender,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(CommuteSession::new())),
            positions,
            network,
            store,
            user: None,
            notices,
            options: TrackerOptions::default(),
            watch_task: None,
            playback_task: None,
        }
    }

    /// Replace the tracker options
    #[must_use]
    pub fn with_options(mut self, options: TrackerOptions) -> Self {
        self.options = options;
        self
    }

    /// Persist fixes for this user
    #[must_use]
    pub fn with_user(mut self, user: Option<AuthUser>) -> Self {
        self.user = user;
        self
    }

    /// Change the signed-in user; takes effect the next time tracking starts
    pub fn set_user(&mut self, user: Option<AuthUser>) {
        self.user = user;
    }

    /// Start a new tracking run
    ///
    /// Clears the previous run and opens a position watch. Already tracking
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityUnavailable` when the device has no positioning, or
    /// the error from opening the watch; the session stays idle either way
    pub async fn start(&mut self) -> AppResult<()> {
        if self.is_watch_running() {
            return Ok(());
        }
        self.abort_playback_task();

        let capability = self.positions.capability();
        if let Err(e) = self.session.lock().await.start(capability) {
            warn!(error = %e, "Commute tracking unavailable");
            return Err(e);
        }

        let watch = match self.positions.watch(self.options.watch).await {
            Ok(watch) => watch,
            Err(e) => {
                self.session.lock().await.stop();
                warn!(error = %e, "Failed to open position watch");
                return Err(e);
            }
        };

        let context = WatchContext {
            session: Arc::clone(&self.session),
            network: Arc::clone(&self.network),
            store: Arc::clone(&self.store),
            user: self.user.clone(),
            notices: self.notices.clone(),
        };
        self.watch_task = Some(tokio::spawn(run_watch(watch, context)));
        Ok(())
    }

    /// Stop tracking; samples are kept
    pub async fn stop(&mut self) -> RouteSummary {
        self.abort_watch_task();
        let mut session = self.session.lock().await;
        session.stop();
        session.summary()
    }

    /// Stop tracking and discard the recorded route
    pub async fn reset(&mut self) {
        self.abort_watch_task();
        self.abort_playback_task();
        let mut session = self.session.lock().await;
        session.stop();
        session.reset();
    }

    /// Start replaying the recorded route; returns whether it is playing
    ///
    /// Needs at least two samples. A replay already running is left alone.
    pub async fn play(&mut self) -> bool {
        if self.is_playback_running() {
            return true;
        }
        if !self.session.lock().await.play() {
            return false;
        }

        let session = Arc::clone(&self.session);
        let tick = self.options.playback_tick;
        let first_tick = Instant::now() + tick;
        self.playback_task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !session.lock().await.tick_playback() {
                    debug!("Playback reached the end of the route");
                    break;
                }
            }
        }));
        true
    }

    /// Stop the replay without rewinding the cursor
    pub async fn stop_playback(&mut self) {
        self.abort_playback_task();
        self.session.lock().await.stop_playback();
    }

    /// Apply host visibility; hiding stops both tracking and playback
    pub async fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.abort_watch_task();
            self.abort_playback_task();
            info!("Host hidden, tracking and playback suspended");
        }
        self.session.lock().await.set_visible(visible);
    }

    /// Copy of the current session state
    pub async fn snapshot(&self) -> CommuteSession {
        self.session.lock().await.clone()
    }

    /// Copy of the recorded samples
    pub async fn samples(&self) -> Vec<GpsSample> {
        self.session.lock().await.samples().to_vec()
    }

    /// Derived route statistics
    pub async fn summary(&self) -> RouteSummary {
        self.session.lock().await.summary()
    }

    /// Whether fixes are being appended
    pub async fn is_tracking(&self) -> bool {
        self.session.lock().await.is_tracking()
    }

    /// Whether the replay is advancing
    pub async fn is_playing(&self) -> bool {
        self.session.lock().await.is_playing()
    }

    /// Current replay cursor
    pub async fn playback_cursor(&self) -> usize {
        self.session.lock().await.playback().cursor_index()
    }

    fn is_watch_running(&self) -> bool {
        self.watch_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn is_playback_running(&self) -> bool {
        self.playback_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    fn abort_watch_task(&mut self) {
        if let Some(task) = self.watch_task.take() {
            task.abort();
        }
    }

    fn abort_playback_task(&mut self) {
        if let Some(task) = self.playback_task.take() {
            task.abort();
        }
    }
}

impl Drop for CommuteTracker {
    fn drop(&mut self) {
        self.abort_watch_task();
        self.abort_playback_task();
    }
}

async fn run_watch(mut watch: PositionWatch, context: WatchContext) {
    let path = context
        .user
        .as_ref()
        .map(|user| CollectionPath::user_collection(&user.uid, COMMUTES_COLLECTION));

    while let Some(event) = watch.next().await {
        match event {
            Ok(fix) => {
                let sample = fix.into_sample(context.network.current());
                if !context.session.lock().await.on_fix_received(sample) {
                    continue;
                }
                if let Some(path) = &path {
                    tokio::spawn(persist_sample(
                        Arc::clone(&context.store),
                        path.clone(),
                        sample,
                        context.notices.clone(),
                    ));
                }
            }
            Err(e) => {
                warn!(error = %e, "Geolocation error");
                context
                    .notices
                    .send(Notice::error("Location unavailable", e.to_string()));
            }
        }
    }
    debug!("Position watch closed");
}

async fn persist_sample(
    store: Arc<dyn DocumentStore>,
    path: CollectionPath,
    sample: GpsSample,
    notices: NoticeSender,
) {
    let payload = match serde_json::to_value(sample) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Failed to encode commute point");
            return;
        }
    };
    if let Err(e) = store.append_document(&path, payload).await {
        error!(collection = %path, error = %e, "Failed to save commute point");
        notices.send(Notice::from_error("Failed to save commute point", &e));
    }
}
