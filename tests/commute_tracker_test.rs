// ABOUTME: Integration tests for the async commute tracker and route replay
// ABOUTME: Uses paused Tokio time, a channel position source and the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{equator_route, sample_at, settle, test_user, TrackerHarness};
use fittrack::errors::ErrorCode;
use fittrack::models::{GpsSample, NetworkClass};
use fittrack::notices::NoticeLevel;
use fittrack::positioning::{ChannelPositionSource, PositioningError};
use fittrack::session::{load_samples, replay_route};
use fittrack::store::CollectionPath;
use std::io::Write;
use std::time::Duration;
use tokio::time::advance;

fn commutes_of(uid: &str) -> CollectionPath {
    CollectionPath::user_collection(uid, "commutes")
}

#[tokio::test]
async fn test_start_without_positioning_reports_capability_error() {
    let mut harness = TrackerHarness::with_source(ChannelPositionSource::unavailable(), None);

    let error = harness.tracker.start().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::CapabilityUnavailable);
    assert!(!harness.tracker.is_tracking().await);
    assert!(!harness.source.is_watching().await);
}

#[tokio::test]
async fn test_fixes_are_appended_and_persisted_per_sample() {
    let mut harness = TrackerHarness::new(Some(test_user("rider")));
    harness.tracker.start().await.unwrap();

    harness.push(&sample_at(0.0, 0.0, 0)).await;
    harness.push(&sample_at(0.0, 0.001, 60)).await;

    let samples = harness.tracker.samples().await;
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[1].network_class, NetworkClass::FourG);

    let summary = harness.tracker.summary().await;
    assert!((summary.elapsed_seconds - 60.0).abs() < 1e-9);
    assert!((summary.distance_km - 0.111).abs() < 0.001);

    let stored = harness.store.documents(&commutes_of("rider")).await;
    assert_eq!(stored.len(), 2);
    let decoded: GpsSample = serde_json::from_value(stored[0].data.clone()).unwrap();
    assert_eq!(decoded.network_class, NetworkClass::FourG);
    assert!(harness.drain_notices().is_empty());
}

#[tokio::test]
async fn test_signed_out_tracking_is_not_persisted() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.0, 0)).await;

    assert_eq!(harness.tracker.samples().await.len(), 1);
    assert!(harness.store.documents(&commutes_of("rider")).await.is_empty());
}

#[tokio::test]
async fn test_signing_in_applies_from_the_next_run() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.0, 0)).await;

    harness.tracker.set_user(Some(test_user("rider")));
    harness.push(&sample_at(0.0, 0.001, 60)).await;
    assert!(harness.store.documents(&commutes_of("rider")).await.is_empty());

    harness.tracker.stop().await;
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.002, 120)).await;

    let stored = harness.store.documents(&commutes_of("rider")).await;
    assert_eq!(stored.len(), 1);
    let decoded: GpsSample = serde_json::from_value(stored[0].data.clone()).unwrap();
    assert!((decoded.longitude - 0.002).abs() < 1e-12);
}

#[tokio::test]
async fn test_failed_write_is_reported_once_and_never_rolled_back() {
    let mut harness = TrackerHarness::new(Some(test_user("rider")));
    harness.store.fail_next_writes(1).await;
    harness.tracker.start().await.unwrap();

    harness.push(&sample_at(0.0, 0.0, 0)).await;
    harness.push(&sample_at(0.0, 0.001, 60)).await;

    assert_eq!(harness.tracker.samples().await.len(), 2);
    assert_eq!(harness.store.documents(&commutes_of("rider")).await.len(), 1);

    let notices = harness.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].title, "Failed to save commute point");
}

#[tokio::test]
async fn test_positioning_errors_notify_without_stopping() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();

    assert!(harness.source.push_error(PositioningError::PermissionDenied).await);
    settle().await;

    let notices = harness.drain_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.starts_with("Location access denied"));
    assert!(harness.tracker.is_tracking().await);

    harness.push(&sample_at(0.0, 0.0, 0)).await;
    assert_eq!(harness.tracker.samples().await.len(), 1);
}

#[tokio::test]
async fn test_stop_cancels_the_watch_and_keeps_samples() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.0, 0)).await;

    let summary = harness.tracker.stop().await;
    settle().await;

    assert_eq!(summary.point_count, 1);
    assert!(!harness.tracker.is_tracking().await);
    assert!(!harness.source.is_watching().await);
    assert_eq!(harness.tracker.samples().await.len(), 1);
}

#[tokio::test]
async fn test_restart_clears_the_previous_run() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.0, 0)).await;
    harness.tracker.stop().await;

    harness.tracker.start().await.unwrap();
    assert!(harness.tracker.samples().await.is_empty());
    assert!(harness.source.is_watching().await);
}

#[tokio::test(start_paused = true)]
async fn test_playback_advances_every_tick_until_the_end() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    for sample in equator_route(4) {
        harness.push(&sample).await;
    }
    harness.tracker.stop().await;

    assert!(harness.tracker.play().await);
    assert_eq!(harness.tracker.playback_cursor().await, 1);

    advance(Duration::from_millis(299)).await;
    settle().await;
    assert_eq!(harness.tracker.playback_cursor().await, 1);

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(harness.tracker.playback_cursor().await, 2);
    assert!(harness.tracker.is_playing().await);

    advance(Duration::from_millis(300)).await;
    settle().await;
    assert_eq!(harness.tracker.playback_cursor().await, 3);
    assert!(!harness.tracker.is_playing().await);

    advance(Duration::from_millis(900)).await;
    settle().await;
    assert_eq!(harness.tracker.playback_cursor().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_stop_playback_leaves_cursor_in_place() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    for sample in equator_route(6) {
        harness.push(&sample).await;
    }
    harness.tracker.stop().await;

    harness.tracker.play().await;
    advance(Duration::from_millis(300)).await;
    settle().await;
    harness.tracker.stop_playback().await;

    advance(Duration::from_millis(1200)).await;
    settle().await;
    assert_eq!(harness.tracker.playback_cursor().await, 2);
    assert!(!harness.tracker.is_playing().await);
}

#[tokio::test]
async fn test_play_needs_two_samples() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.0, 0)).await;
    harness.tracker.stop().await;

    assert!(!harness.tracker.play().await);
    assert!(!harness.tracker.is_playing().await);
}

#[tokio::test]
async fn test_two_point_playback_finishes_on_the_first_frame() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    harness.push(&sample_at(0.0, 0.0, 0)).await;
    harness.push(&sample_at(0.0, 0.001, 60)).await;
    harness.tracker.stop().await;

    assert!(!harness.tracker.play().await);
    assert_eq!(harness.tracker.playback_cursor().await, 1);
    assert!(!harness.tracker.is_playing().await);
}

#[tokio::test(start_paused = true)]
async fn test_hiding_suspends_tracking_and_playback() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    for sample in equator_route(5) {
        harness.push(&sample).await;
    }
    assert!(harness.tracker.play().await);

    harness.tracker.set_visible(false).await;
    settle().await;

    assert!(!harness.tracker.is_tracking().await);
    assert!(!harness.tracker.is_playing().await);
    assert!(!harness.source.is_watching().await);
    let kept: Vec<_> = harness
        .tracker
        .samples()
        .await
        .iter()
        .map(GpsSample::coordinate)
        .collect();
    let expected: Vec<_> = equator_route(5).iter().map(GpsSample::coordinate).collect();
    assert_eq!(kept, expected);

    advance(Duration::from_secs(2)).await;
    settle().await;
    assert_eq!(harness.tracker.playback_cursor().await, 1);
}

#[tokio::test]
async fn test_dropping_the_tracker_closes_the_watch() {
    let mut harness = TrackerHarness::new(None);
    harness.tracker.start().await.unwrap();
    assert!(harness.source.is_watching().await);

    let TrackerHarness {
        tracker, source, ..
    } = harness;
    drop(tracker);
    settle().await;

    assert!(!source.is_watching().await);
}

#[tokio::test]
async fn test_replay_route_from_file() {
    let route = equator_route(3);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&route).unwrap().as_bytes())
        .unwrap();

    let loaded = load_samples(file.path()).await.unwrap();
    assert_eq!(loaded, route);

    let mut harness = TrackerHarness::new(None);
    let summary = replay_route(
        &mut harness.tracker,
        &harness.source,
        &loaded,
        Duration::from_secs(1),
    )
    .await
    .unwrap();

    assert_eq!(summary.point_count, 3);
    assert!((summary.elapsed_seconds - 120.0).abs() < 1e-9);
    assert!(!harness.tracker.is_tracking().await);
}

#[tokio::test]
async fn test_unreadable_route_file_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let error = load_samples(&dir.path().join("missing.json"))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"not\": \"a route\"}").unwrap();
    let error = load_samples(file.path()).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}
