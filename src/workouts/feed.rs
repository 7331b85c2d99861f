// ABOUTME: Live newest-first feed of a user's workouts with dashboard aggregates
// ABOUTME: Decodes store snapshots into records, skipping documents that no longer decode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::store::{subscribe_with_fallback, CollectionPath, CollectionSubscription, DocumentStore, Snapshot};
use fittrack_core::constants::store::{TIMESTAMP_FIELD, WORKOUTS_COLLECTION};
use fittrack_core::errors::AppResult;
use fittrack_core::models::{AuthUser, WorkoutRecord};
use fittrack_metrics::{progress_series, ProgressPoint, WorkoutTotals};
use tracing::{debug, warn};

/// Workouts of one user, newest first
pub struct WorkoutFeed {
    subscription: CollectionSubscription,
    records: Vec<WorkoutRecord>,
}

impl WorkoutFeed {
    /// Subscribe to `users/{uid}/workouts` ordered by timestamp
    ///
    /// Falls back to client-side ordering when the store has no index.
    ///
    /// # Errors
    ///
    /// Returns the store's error if neither subscription can be opened
    pub async fn subscribe(store: &dyn DocumentStore, user: &AuthUser) -> AppResult<Self> {
        let path = CollectionPath::user_collection(&user.uid, WORKOUTS_COLLECTION);
        let subscription = subscribe_with_fallback(store, &path, TIMESTAMP_FIELD).await?;
        Ok(Self {
            subscription,
            records: Vec::new(),
        })
    }

    /// Wait for the next snapshot and return the refreshed records
    ///
    /// `None` once the store closes the subscription.
    pub async fn next(&mut self) -> Option<&[WorkoutRecord]> {
        let snapshot = self.subscription.next().await?;
        self.records = decode_snapshot(snapshot);
        debug!(count = self.records.len(), "Workout feed refreshed");
        Some(&self.records)
    }

    /// Records from the most recent snapshot
    #[must_use]
    pub fn latest(&self) -> &[WorkoutRecord] {
        &self.records
    }

    /// Dashboard totals over the latest records
    #[must_use]
    pub fn totals(&self) -> WorkoutTotals {
        WorkoutTotals::from_records(&self.records)
    }

    /// Progress chart points over the latest records, oldest first
    #[must_use]
    pub fn progress(&self) -> Vec<ProgressPoint> {
        progress_series(&self.records)
    }
}

fn decode_snapshot(snapshot: Snapshot) -> Vec<WorkoutRecord> {
    snapshot
        .documents
        .into_iter()
        .filter_map(|document| {
            match serde_json::from_value::<WorkoutRecord>(document.data) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(document = %document.id, error = %e, "Skipping undecodable workout");
                    None
                }
            }
        })
        .collect()
}
