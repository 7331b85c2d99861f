// ABOUTME: Workout record model and the fixed activity vocabulary of the workout form
// ABOUTME: Records are immutable once built and carry a copy of any originating GPS samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::gps::{Coordinate, GpsSample};

/// Activity vocabulary offered by the workout form
///
/// `Other` carries a free-form label entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityType {
    /// Running
    Running,
    /// Walking
    Walking,
    /// Cycling
    Cycling,
    /// Swimming
    Swimming,
    /// General gym session
    Gym,
    /// Weight training
    WeightTraining,
    /// Yoga
    Yoga,
    /// Pilates
    Pilates,
    /// Tennis
    Tennis,
    /// Basketball
    Basketball,
    /// Football
    Football,
    /// Badminton
    Badminton,
    /// Volleyball
    Volleyball,
    /// Boxing
    Boxing,
    /// Martial arts
    MartialArts,
    /// Climbing
    Climbing,
    /// Dancing
    Dancing,
    /// Hiking
    Hiking,
    /// `CrossFit`
    CrossFit,
    /// Cardio
    Cardio,
    /// Strength training
    StrengthTraining,
    /// Stretching
    Stretching,
    /// Open bucket with a user-supplied label
    Other(String),
}

impl ActivityType {
    /// Every predefined activity, in form order
    pub const PREDEFINED: [Self; 22] = [
        Self::Running,
        Self::Walking,
        Self::Cycling,
        Self::Swimming,
        Self::Gym,
        Self::WeightTraining,
        Self::Yoga,
        Self::Pilates,
        Self::Tennis,
        Self::Basketball,
        Self::Football,
        Self::Badminton,
        Self::Volleyball,
        Self::Boxing,
        Self::MartialArts,
        Self::Climbing,
        Self::Dancing,
        Self::Hiking,
        Self::CrossFit,
        Self::Cardio,
        Self::StrengthTraining,
        Self::Stretching,
    ];

    /// Display label, as stored in the `type` field of a workout document
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Running => "Running",
            Self::Walking => "Walking",
            Self::Cycling => "Cycling",
            Self::Swimming => "Swimming",
            Self::Gym => "Gym",
            Self::WeightTraining => "Weight Training",
            Self::Yoga => "Yoga",
            Self::Pilates => "Pilates",
            Self::Tennis => "Tennis",
            Self::Basketball => "Basketball",
            Self::Football => "Football",
            Self::Badminton => "Badminton",
            Self::Volleyball => "Volleyball",
            Self::Boxing => "Boxing",
            Self::MartialArts => "Martial Arts",
            Self::Climbing => "Climbing",
            Self::Dancing => "Dancing",
            Self::Hiking => "Hiking",
            Self::CrossFit => "CrossFit",
            Self::Cardio => "Cardio",
            Self::StrengthTraining => "Strength Training",
            Self::Stretching => "Stretching",
            Self::Other(label) => label,
        }
    }

    /// Case-insensitive parse of a form label; unknown labels become `Other`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let needle = label.trim();
        Self::PREDEFINED
            .iter()
            .find(|activity| activity.label().eq_ignore_ascii_case(needle))
            .cloned()
            .unwrap_or_else(|| Self::Other(needle.to_owned()))
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A logged activity
///
/// Built either from the manual workout form or from a finished commute
/// session. The originating samples are copied in at logging time and are
/// never shared with the live session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Free-form activity label
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Duration in minutes
    #[serde(rename = "duration")]
    pub duration_minutes: f64,
    /// Estimated energy expenditure in kcal
    #[serde(rename = "calories", default)]
    pub calories_estimate: u32,
    /// Optional notes, stored as an empty string when absent
    #[serde(
        default,
        serialize_with = "serialize_notes",
        deserialize_with = "deserialize_notes"
    )]
    pub notes: Option<String>,
    /// Creation time in Unix milliseconds
    #[serde(rename = "timestamp", default)]
    pub timestamp_millis: i64,
    /// Calendar date of the workout (`YYYY-MM-DD`)
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Position when the workout was logged
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// GPS samples of the commute this workout was derived from
    #[serde(
        rename = "commutePoints",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub origin_samples: Option<Vec<GpsSample>>,
}

fn serialize_notes<S: Serializer>(notes: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(notes.as_deref().unwrap_or(""))
}

fn deserialize_notes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let notes = Option::<String>::deserialize(deserializer)?;
    Ok(notes.filter(|text| !text.trim().is_empty()))
}
