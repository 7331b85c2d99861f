// ABOUTME: Display helpers for elapsed time and route distance
// ABOUTME: Renders m:ss clocks and metre/kilometre distance labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fittrack_core::constants::geo::METERS_PER_KM;

/// Format seconds as `m:ss`; negative or non-finite input renders as `0:00`
#[must_use]
pub fn format_clock(seconds: f64) -> String {
    let whole = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Format a distance: whole metres below 1 km, otherwise kilometres with two decimals
#[must_use]
pub fn format_distance(distance_km: f64) -> String {
    if distance_km < 1.0 {
        format!("{}m", (distance_km * METERS_PER_KM).round().max(0.0) as u64)
    } else {
        format!("{distance_km:.2}km")
    }
}
