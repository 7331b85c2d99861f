// ABOUTME: Core data models shared across the FitTrack workspace
// ABOUTME: Re-exports GPS, workout, place, weather and user models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain models.
//!
//! Serialized field names follow the document shapes the external store
//! already holds (`lat`/`lng`/`timestamp`/`networkType` for samples,
//! `type`/`duration`/`calories` for workouts), so records written by older
//! clients decode unchanged.

/// GPS fixes and network link classification
pub mod gps;
/// Workout records and the activity vocabulary
pub mod workout;
/// Nearby place search results and categories
pub mod place;
/// Current weather conditions
pub mod weather;
/// Authenticated user identity
pub mod user;

pub use gps::{Coordinate, GpsSample, NetworkClass};
pub use place::{NearbyPlace, PlaceCategory};
pub use user::AuthUser;
pub use weather::CurrentWeather;
pub use workout::{ActivityType, WorkoutRecord};
