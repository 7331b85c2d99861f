// ABOUTME: Route metrics engine turning GPS samples and workout records into derived statistics
// ABOUTME: Haversine distance, elapsed time, calorie estimation, segments, totals and formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitTrack Metrics
//!
//! Stateless functions shared by the commute tracker, the workout form and
//! the dashboard. Nothing here performs I/O or caches results: every value is
//! recomputed from the input slice on each call.
//!
//! Samples are folded in the order they were appended. Out-of-order
//! timestamps are neither sorted nor rejected, so [`elapsed_seconds`] may be
//! negative for such input.

/// Great-circle distance, elapsed time, route summaries and segments
pub mod route;

/// Per-minute calorie rate tables
pub mod calories;

/// Dashboard totals and progress series over workout records
pub mod summary;

/// Display formatting for clocks and distances
pub mod format;

pub use calories::{estimate_calories, CalorieRates};
pub use format::{format_clock, format_distance};
pub use route::{
    elapsed_seconds, haversine_km, route_segments, route_summary, total_distance_km,
    RouteSegment, RouteSummary,
};
pub use summary::{progress_series, ProgressPoint, WorkoutTotals};
