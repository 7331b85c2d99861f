// ABOUTME: Per-minute calorie rate tables and the calorie estimate for a workout
// ABOUTME: Keyword table serves commute logging, exact table serves the manual workout form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::cast_sign_loss)] // Safe: estimate is clamped non-negative before the cast

use fittrack_core::constants::calories::{EXACT_DEFAULT_RATE, KEYWORD_DEFAULT_RATE};
use serde::{Deserialize, Serialize};

/// Which rate table to consult
///
/// The two call sites disagree on the default rate for unmatched activities
/// (8 kcal/min for keyword matching, 6 kcal/min for exact matching). Both are
/// kept so each caller reproduces its established estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalorieRates {
    /// Case-insensitive substring match, used when logging a commute
    Keyword,
    /// Case-insensitive exact match on the form vocabulary
    #[default]
    Exact,
}

const KEYWORD_RATES: [(&[&str], u32); 5] = [
    (&["run", "jog"], 12),
    (&["bike", "cycle"], 10),
    (&["swim"], 14),
    (&["walk", "commute"], 5),
    (&["gym", "weight"], 8),
];

const EXACT_RATES: [(&str, u32); 22] = [
    ("running", 12),
    ("cycling", 10),
    ("swimming", 14),
    ("walking", 5),
    ("gym", 8),
    ("weight training", 8),
    ("yoga", 3),
    ("pilates", 4),
    ("tennis", 7),
    ("basketball", 8),
    ("football", 9),
    ("badminton", 6),
    ("volleyball", 4),
    ("boxing", 12),
    ("martial arts", 10),
    ("climbing", 9),
    ("dancing", 5),
    ("hiking", 6),
    ("crossfit", 15),
    ("cardio", 10),
    ("strength training", 6),
    ("stretching", 2),
];

impl CalorieRates {
    /// Rate in kcal per minute for an activity label
    #[must_use]
    pub fn rate_per_minute(self, activity: &str) -> u32 {
        let label = activity.to_lowercase();
        match self {
            Self::Keyword => KEYWORD_RATES
                .iter()
                .find(|(needles, _)| needles.iter().any(|needle| label.contains(needle)))
                .map_or(KEYWORD_DEFAULT_RATE, |(_, rate)| *rate),
            Self::Exact => EXACT_RATES
                .iter()
                .find(|(name, _)| *name == label.trim())
                .map_or(EXACT_DEFAULT_RATE, |(_, rate)| *rate),
        }
    }

    /// Rate applied to activities the table does not recognise
    #[must_use]
    pub const fn default_rate(self) -> u32 {
        match self {
            Self::Keyword => KEYWORD_DEFAULT_RATE,
            Self::Exact => EXACT_DEFAULT_RATE,
        }
    }
}

/// Estimated kcal for `duration_minutes` of `activity`
///
/// `round(minutes * rate)`; zero for zero, negative or non-finite durations.
#[must_use]
pub fn estimate_calories(activity: &str, duration_minutes: f64, rates: CalorieRates) -> u32 {
    if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
        return 0;
    }
    let estimate = (duration_minutes * f64::from(rates.rate_per_minute(activity))).round();
    estimate.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_order_prefers_earlier_rules() {
        // "jogging to the gym" hits the run/jog rule before gym/weight
        assert_eq!(CalorieRates::Keyword.rate_per_minute("Jogging to the gym"), 12);
        assert_eq!(CalorieRates::Keyword.rate_per_minute("Bike commute"), 10);
    }

    #[test]
    fn test_keyword_table_does_not_match_cycling() {
        // only the literal "cycle" substring is recognised
        assert_eq!(CalorieRates::Keyword.rate_per_minute("Cycling"), KEYWORD_DEFAULT_RATE);
        assert_eq!(CalorieRates::Exact.rate_per_minute("Cycling"), 10);
    }

    #[test]
    fn test_non_finite_duration() {
        assert_eq!(estimate_calories("Running", f64::NAN, CalorieRates::Exact), 0);
        assert_eq!(estimate_calories("Running", f64::INFINITY, CalorieRates::Keyword), 0);
    }
}
