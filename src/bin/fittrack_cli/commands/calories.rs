// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Calorie estimate command for fittrack-cli
// ABOUTME: Looks up the per-minute rate in the chosen table and prints the estimate

use fittrack_metrics::{estimate_calories, CalorieRates};

/// Print the estimate for `activity` over `minutes`
pub fn run(activity: &str, minutes: f64, rates: CalorieRates) {
    let calories = estimate_calories(activity, minutes, rates);
    println!(
        "{activity} for {minutes} minutes: {calories} calories ({} kcal/min, {rates:?} table)",
        rates.rate_per_minute(activity)
    );
}
