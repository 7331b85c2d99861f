// ABOUTME: Dashboard aggregation over logged workout records
// ABOUTME: Totals, average duration and the date-ordered progress series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use fittrack_core::models::WorkoutRecord;
use serde::{Deserialize, Serialize};

/// Aggregate statistics shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutTotals {
    /// Number of workouts
    pub total_workouts: usize,
    /// Sum of durations in minutes
    pub total_duration_minutes: f64,
    /// Sum of calorie estimates
    pub total_calories: u64,
    /// Mean duration rounded to whole minutes, zero when empty
    pub average_duration_minutes: f64,
}

impl WorkoutTotals {
    /// Fold a set of records into totals
    #[must_use]
    pub fn from_records(records: &[WorkoutRecord]) -> Self {
        let total_workouts = records.len();
        let total_duration_minutes: f64 = records.iter().map(|r| r.duration_minutes).sum();
        let total_calories = records.iter().map(|r| u64::from(r.calories_estimate)).sum();
        let average_duration_minutes = if total_workouts == 0 {
            0.0
        } else {
            (total_duration_minutes / total_workouts as f64).round()
        };

        Self {
            total_workouts,
            total_duration_minutes,
            total_calories,
            average_duration_minutes,
        }
    }
}

/// One point on the progress chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Workout date
    pub date: NaiveDate,
    /// Calories burned
    pub calories: u32,
    /// Duration in minutes
    pub duration_minutes: f64,
}

/// Dated records as chart points, oldest first
///
/// Records without a date are skipped. Records sharing a date keep their
/// input order.
#[must_use]
pub fn progress_series(records: &[WorkoutRecord]) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = records
        .iter()
        .filter_map(|record| {
            record.date.map(|date| ProgressPoint {
                date,
                calories: record.calories_estimate,
                duration_minutes: record.duration_minutes,
            })
        })
        .collect();
    points.sort_by_key(|point| point.date);
    points
}
