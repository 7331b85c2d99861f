// ABOUTME: Integration tests for workout form validation, commute logging and the workout feed
// ABOUTME: Verifies validation order, stored document shape, notices and dashboard aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use common::{equator_route, sample_at, test_user};
use fittrack::errors::ErrorCode;
use fittrack::models::{ActivityType, Coordinate, WorkoutRecord};
use fittrack::notices::{NoticeLevel, NoticeReceiver, NoticeSender};
use fittrack::store::memory::InMemoryDocumentStore;
use fittrack::store::CollectionPath;
use fittrack::workouts::{commute_record, WorkoutDraft, WorkoutFeed, WorkoutLogger};
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 7, 30, 0).unwrap()
}

fn draft(activity: Option<ActivityType>, duration: &str) -> WorkoutDraft {
    WorkoutDraft {
        activity,
        duration: duration.to_owned(),
        notes: String::new(),
    }
}

fn logger(store: &InMemoryDocumentStore) -> (WorkoutLogger, NoticeReceiver) {
    let (sender, receiver) = NoticeSender::channel();
    (WorkoutLogger::new(Arc::new(store.clone()), sender), receiver)
}

fn workouts_of(uid: &str) -> CollectionPath {
    CollectionPath::user_collection(uid, "workouts")
}

// ============================================================================
// Form validation
// ============================================================================

#[test]
fn test_valid_draft_builds_record() {
    let mut form = draft(Some(ActivityType::Yoga), "25");
    form.notes = "  slow flow  ".to_owned();

    let record = form.validate(now()).unwrap();
    assert_eq!(record.activity_type, "Yoga");
    assert!((record.duration_minutes - 25.0).abs() < f64::EPSILON);
    assert_eq!(record.calories_estimate, 75);
    assert_eq!(record.notes.as_deref(), Some("slow flow"));
    assert_eq!(record.timestamp_millis, now().timestamp_millis());
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 3, 14));
    assert!(record.location.is_none());
    assert!(record.origin_samples.is_none());
}

#[test]
fn test_duration_is_checked_before_activity() {
    for duration in ["", "abc", "0", "-10", "NaN"] {
        let error = draft(None, duration).validate(now()).unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidInput, "duration {duration:?}");
        assert_eq!(error.message, "Please enter a valid duration");
    }
}

#[test]
fn test_missing_activity_is_rejected() {
    let error = draft(None, "30").validate(now()).unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(error.message, "Please select or enter a workout type");

    let blank_custom = draft(Some(ActivityType::Other("   ".to_owned())), "30");
    assert_eq!(
        blank_custom.validate(now()).unwrap_err().code,
        ErrorCode::MissingRequiredField
    );
}

#[test]
fn test_custom_activity_uses_exact_table_default() {
    let record = draft(Some(ActivityType::Other("Parkour".to_owned())), "10")
        .validate(now())
        .unwrap();
    assert_eq!(record.activity_type, "Parkour");
    assert_eq!(record.calories_estimate, 60);
}

// ============================================================================
// Commute records
// ============================================================================

#[test]
fn test_commute_record_from_route() {
    let route = [sample_at(0.0, 0.0, 0), sample_at(0.0, 0.001, 60), sample_at(0.0, 0.002, 150)];
    let location = Some(route[2].coordinate());

    let record = commute_record(&route, location, now()).unwrap();
    assert_eq!(record.activity_type, "Commute");
    // 150 s rounds to 3 minutes
    assert!((record.duration_minutes - 3.0).abs() < f64::EPSILON);
    assert_eq!(record.calories_estimate, 15);
    assert_eq!(
        record.notes.as_deref(),
        Some("Tracked route: 0.22 km distance with 3 GPS points")
    );
    assert_eq!(record.location, Some(Coordinate::new(0.0, 0.002)));
    assert_eq!(record.origin_samples.as_deref(), Some(route.as_slice()));
}

#[test]
fn test_commute_record_needs_two_points() {
    let error = commute_record(&equator_route(1), None, now()).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

// ============================================================================
// Logging
// ============================================================================

#[tokio::test]
async fn test_submit_stores_document_and_confirms() {
    let store = InMemoryDocumentStore::new();
    let (logger, mut notices) = logger(&store);
    let user = test_user("ada");

    logger
        .submit(Some(&user), &draft(Some(ActivityType::Running), "30"), now())
        .await
        .unwrap();

    let stored = store.documents(&workouts_of("ada")).await;
    assert_eq!(stored.len(), 1);
    let data = &stored[0].data;
    assert_eq!(data["type"], "Running");
    assert_eq!(data["duration"], 30.0);
    assert_eq!(data["calories"], 360);
    assert_eq!(data["notes"], "");
    assert_eq!(data["date"], "2025-03-14");
    assert!(data["location"].is_null());

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.title, "Workout logged!");
    assert_eq!(notice.message, "Running for 30 minutes (360 calories)");
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_the_store() {
    let store = InMemoryDocumentStore::new();
    let (logger, mut notices) = logger(&store);
    let user = test_user("ada");

    let error = logger
        .submit(Some(&user), &draft(Some(ActivityType::Gym), ""), now())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert!(store.documents(&workouts_of("ada")).await.is_empty());

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Please enter a valid duration");
}

#[tokio::test]
async fn test_signed_out_logging_requires_auth() {
    let store = InMemoryDocumentStore::new();
    let (logger, mut notices) = logger(&store);

    let error = logger
        .submit(None, &draft(Some(ActivityType::Gym), "20"), now())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthRequired);
    assert_eq!(
        notices.try_recv().unwrap().message,
        "You must be logged in to log a workout."
    );
}

#[tokio::test]
async fn test_store_failure_is_reported_once_without_retry() {
    let store = InMemoryDocumentStore::new();
    store.fail_next_writes(1).await;
    let (logger, mut notices) = logger(&store);
    let user = test_user("ada");

    let error = logger
        .submit(Some(&user), &draft(Some(ActivityType::Hiking), "60"), now())
        .await
        .unwrap_err();
    assert!(error.is_transient());
    assert!(store.documents(&workouts_of("ada")).await.is_empty());

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.title, "Error");
    assert_eq!(notice.message, "Failed to log workout. Please try again.");
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_log_commute_stores_route_copy() {
    let store = InMemoryDocumentStore::new();
    let (logger, _notices) = logger(&store);
    let user = test_user("ada");
    let route = equator_route(3);

    logger.log_commute(Some(&user), &route, now()).await.unwrap();

    let stored = store.documents(&workouts_of("ada")).await;
    let record: WorkoutRecord = serde_json::from_value(stored[0].data.clone()).unwrap();
    assert_eq!(record.activity_type, "Commute");
    assert_eq!(record.origin_samples.unwrap(), route);
    assert_eq!(record.location, Some(route[2].coordinate()));
    assert_eq!(stored[0].data["commutePoints"].as_array().unwrap().len(), 3);
}

// ============================================================================
// Feed
// ============================================================================

#[tokio::test]
async fn test_feed_is_newest_first_and_totals_update() {
    let store = InMemoryDocumentStore::without_index();
    let (logger, _notices) = logger(&store);
    let user = test_user("ada");

    let mut feed = WorkoutFeed::subscribe(&store, &user).await.unwrap();
    assert!(feed.next().await.unwrap().is_empty());

    let earlier = Utc.with_ymd_and_hms(2025, 3, 12, 18, 0, 0).unwrap();
    logger
        .submit(Some(&user), &draft(Some(ActivityType::Running), "30"), earlier)
        .await
        .unwrap();
    feed.next().await.unwrap();
    logger
        .submit(Some(&user), &draft(Some(ActivityType::Yoga), "20"), now())
        .await
        .unwrap();

    let latest = feed.next().await.unwrap();
    let types: Vec<&str> = latest.iter().map(|r| r.activity_type.as_str()).collect();
    assert_eq!(types, ["Yoga", "Running"]);

    let totals = feed.totals();
    assert_eq!(totals.total_workouts, 2);
    assert_eq!(totals.total_calories, 420);
    assert!((totals.total_duration_minutes - 50.0).abs() < f64::EPSILON);

    let progress = feed.progress();
    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].date, earlier.date_naive());
    assert_eq!(progress[0].calories, 360);
}

#[tokio::test]
async fn test_feed_skips_undecodable_documents() {
    use fittrack::store::DocumentStore;
    use serde_json::json;

    let store = InMemoryDocumentStore::new();
    let user = test_user("ada");
    store
        .append_document(&workouts_of("ada"), json!({"type": "Gym", "duration": 45, "timestamp": 2}))
        .await
        .unwrap();
    store
        .append_document(&workouts_of("ada"), json!({"garbage": true, "timestamp": 3}))
        .await
        .unwrap();

    let mut feed = WorkoutFeed::subscribe(&store, &user).await.unwrap();
    let records = feed.next().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].activity_type, "Gym");
}
