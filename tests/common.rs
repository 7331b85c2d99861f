// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, sample builders, users and a wired commute tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `fittrack`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use fittrack::models::{AuthUser, GpsSample, NetworkClass};
use fittrack::notices::{Notice, NoticeReceiver, NoticeSender};
use fittrack::positioning::{ChannelPositionSource, PositionFix, StaticNetworkProbe};
use fittrack::session::{CommuteTracker, TrackerOptions};
use fittrack::store::memory::InMemoryDocumentStore;
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Sample at `(lat, lng)` captured `seconds` after the epoch
pub fn sample_at(lat: f64, lng: f64, seconds: i64) -> GpsSample {
    GpsSample::new(lat, lng, seconds * 1000)
}

/// Straight eastbound route along the equator, one point per minute
pub fn equator_route(points: usize) -> Vec<GpsSample> {
    (0..points)
        .map(|i| sample_at(0.0, i as f64 * 0.001, i as i64 * 60))
        .collect()
}

/// Fix matching a sample
pub fn fix_for(sample: &GpsSample) -> PositionFix {
    PositionFix::new(sample.latitude, sample.longitude, sample.captured_at_millis)
}

/// Email/password user
pub fn test_user(uid: &str) -> AuthUser {
    AuthUser {
        uid: uid.to_owned(),
        email: Some(format!("{uid}@example.com")),
        provider: "password".to_owned(),
    }
}

/// Tracker wired to in-memory collaborators
pub struct TrackerHarness {
    pub tracker: CommuteTracker,
    pub source: ChannelPositionSource,
    pub store: InMemoryDocumentStore,
    pub notices: NoticeReceiver,
}

impl TrackerHarness {
    /// Harness on a device with positioning, reporting a 4G link
    pub fn new(user: Option<AuthUser>) -> Self {
        Self::with_source(ChannelPositionSource::new(), user)
    }

    /// Harness around a given position source
    pub fn with_source(source: ChannelPositionSource, user: Option<AuthUser>) -> Self {
        init_test_logging();
        let store = InMemoryDocumentStore::new();
        let (sender, notices) = NoticeSender::channel();
        let tracker = CommuteTracker::new(
            Arc::new(source.clone()),
            Arc::new(StaticNetworkProbe::new(NetworkClass::FourG, 12.5)),
            Arc::new(store.clone()),
            sender,
        )
        .with_options(TrackerOptions {
            playback_tick: Duration::from_millis(300),
            ..TrackerOptions::default()
        })
        .with_user(user);
        Self {
            tracker,
            source,
            store,
            notices,
        }
    }

    /// Push a fix and let the watch and persistence tasks run
    pub async fn push(&self, sample: &GpsSample) {
        assert!(self.source.push(fix_for(sample)).await, "no watch open");
        settle().await;
    }

    /// Drain every notice received so far
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut drained = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            drained.push(notice);
        }
        drained
    }
}

/// Give spawned tasks a chance to run to completion
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
