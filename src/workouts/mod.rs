// ABOUTME: Workout logging from the manual form and from finished commutes
// ABOUTME: Validates drafts, estimates calories per call site and appends records for the signed-in user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Live, newest-first view of a user's workouts
pub mod feed;

pub use feed::WorkoutFeed;

use crate::notices::{Notice, NoticeSender};
use crate::store::{CollectionPath, DocumentId, DocumentStore};
use chrono::{DateTime, Utc};
use fittrack_core::constants::{
    playback::MIN_SAMPLES, store::WORKOUTS_COLLECTION, workouts::COMMUTE_ACTIVITY,
};
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::{ActivityType, AuthUser, Coordinate, GpsSample, WorkoutRecord};
use fittrack_metrics::{estimate_calories, route_summary, CalorieRates};
use std::sync::Arc;
use tracing::{info, warn};

/// Unvalidated input from the workout form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutDraft {
    /// Selected activity; `Other` carries the user's custom label
    pub activity: Option<ActivityType>,
    /// Duration in minutes as typed
    pub duration: String,
    /// Free-form notes
    pub notes: String,
}

impl WorkoutDraft {
    /// Validate the draft into a record stamped with `now`
    ///
    /// Calories use the exact-match rate table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the duration is missing, unparseable or
    /// not positive, and `MissingRequiredField` when no activity resolves
    pub fn validate(&self, now: DateTime<Utc>) -> AppResult<WorkoutRecord> {
        let duration_minutes = self
            .duration
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|minutes| minutes.is_finite() && *minutes > 0.0)
            .ok_or_else(|| AppError::invalid_input("Please enter a valid duration"))?;

        let activity = self
            .activity
            .as_ref()
            .map(|activity| activity.label().trim().to_owned())
            .filter(|label| !label.is_empty())
            .ok_or_else(|| AppError::missing_field("Please select or enter a workout type"))?;

        let notes = self.notes.trim();
        Ok(WorkoutRecord {
            calories_estimate: estimate_calories(&activity, duration_minutes, CalorieRates::Exact),
            activity_type: activity,
            duration_minutes,
            notes: (!notes.is_empty()).then(|| notes.to_owned()),
            timestamp_millis: now.timestamp_millis(),
            date: Some(now.date_naive()),
            location: None,
            origin_samples: None,
        })
    }
}

/// Build a `Commute` workout from a recorded route
///
/// Duration is the elapsed time rounded to whole minutes, calories use the
/// keyword rate table and the samples are copied into the record.
///
/// # Errors
///
/// Returns `InvalidInput` when fewer than two samples were recorded
pub fn commute_record(
    samples: &[GpsSample],
    location: Option<Coordinate>,
    now: DateTime<Utc>,
) -> AppResult<WorkoutRecord> {
    if samples.len() < MIN_SAMPLES {
        return Err(AppError::invalid_input(
            "Track a route with at least two points before logging it",
        ));
    }
    let summary = route_summary(samples);
    let duration_minutes = (summary.elapsed_seconds / 60.0).round();

    Ok(WorkoutRecord {
        activity_type: COMMUTE_ACTIVITY.to_owned(),
        duration_minutes,
        calories_estimate: estimate_calories(
            COMMUTE_ACTIVITY,
            duration_minutes,
            CalorieRates::Keyword,
        ),
        notes: Some(format!(
            "Tracked route: {:.2} km distance with {} GPS points",
            summary.distance_km, summary.point_count
        )),
        timestamp_millis: now.timestamp_millis(),
        date: Some(now.date_naive()),
        location,
        origin_samples: Some(samples.to_vec()),
    })
}

/// Appends workout records for the signed-in user
///
/// Every call produces exactly one notice, whether it succeeds or fails.
#[derive(Clone)]
pub struct WorkoutLogger {
    store: Arc<dyn DocumentStore>,
    notices: NoticeSender,
}

impl WorkoutLogger {
    /// Logger writing to `store`
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, notices: NoticeSender) -> Self {
        Self { store, notices }
    }

    /// Append a record to `users/{uid}/workouts`
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a user, or the store's error when the
    /// write fails; the record is not retried
    pub async fn log(&self, user: Option<&AuthUser>, record: WorkoutRecord) -> AppResult<DocumentId> {
        let Some(user) = user else {
            self.notices.send(Notice::error(
                "Error",
                "You must be logged in to log a workout.",
            ));
            return Err(AppError::auth_required());
        };

        let path = CollectionPath::user_collection(&user.uid, WORKOUTS_COLLECTION);
        let written = match serde_json::to_value(&record) {
            Ok(payload) => self.store.append_document(&path, payload).await,
            Err(e) => Err(e.into()),
        };

        match written {
            Ok(id) => {
                info!(
                    user.id = %user.uid,
                    workout.activity = %record.activity_type,
                    workout.calories = record.calories_estimate,
                    "Workout logged"
                );
                self.notices.send(Notice::info(
                    "Workout logged!",
                    format!(
                        "{} for {} minutes ({} calories)",
                        record.activity_type, record.duration_minutes, record.calories_estimate
                    ),
                ));
                Ok(id)
            }
            Err(e) => {
                warn!(user.id = %user.uid, error = %e, "Error logging workout");
                self.notices
                    .send(Notice::error("Error", "Failed to log workout. Please try again."));
                Err(e)
            }
        }
    }

    /// Validate a form draft and log it
    ///
    /// # Errors
    ///
    /// Returns the validation error without touching the store, or any
    /// error from [`Self::log`]
    pub async fn submit(
        &self,
        user: Option<&AuthUser>,
        draft: &WorkoutDraft,
        now: DateTime<Utc>,
    ) -> AppResult<DocumentId> {
        match draft.validate(now) {
            Ok(record) => self.log(user, record).await,
            Err(e) => {
                self.notices.send(Notice::error("Error", e.message.clone()));
                Err(e)
            }
        }
    }

    /// Log a recorded commute as a workout
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a route under two samples, or any error
    /// from [`Self::log`]
    pub async fn log_commute(
        &self,
        user: Option<&AuthUser>,
        samples: &[GpsSample],
        now: DateTime<Utc>,
    ) -> AppResult<DocumentId> {
        let location = samples.last().map(GpsSample::coordinate);
        match commute_record(samples, location, now) {
            Ok(record) => self.log(user, record).await,
            Err(e) => {
                self.notices.send(Notice::error("Error", e.message.clone()));
                Err(e)
            }
        }
    }
}
