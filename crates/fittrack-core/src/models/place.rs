// ABOUTME: Nearby place search results and the sport/leisure category vocabulary
// ABOUTME: Categories map onto OpenStreetMap structured tags for the place finder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::gps::Coordinate;

/// Place categories offered by the location finder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    /// Gym
    Gym,
    /// Park
    Park,
    /// Swimming pool
    SwimmingPool,
    /// Sports centre
    SportsCentre,
    /// Tennis court
    Tennis,
    /// Football pitch
    Football,
    /// Basketball court
    Basketball,
    /// Fitness centre
    FitnessCentre,
    /// Badminton
    Badminton,
    /// Volleyball
    Volleyball,
    /// Boxing club
    Boxing,
    /// Yoga studio
    Yoga,
    /// Pilates studio
    Pilates,
    /// Martial arts dojo
    MartialArts,
    /// Climbing gym
    Climbing,
    /// Squash court
    Squash,
    /// Ice rink
    IceRink,
    /// Running track
    Track,
}

impl PlaceCategory {
    /// All categories in finder order
    pub const ALL: [Self; 18] = [
        Self::Gym,
        Self::Park,
        Self::SwimmingPool,
        Self::SportsCentre,
        Self::Tennis,
        Self::Football,
        Self::Basketball,
        Self::FitnessCentre,
        Self::Badminton,
        Self::Volleyball,
        Self::Boxing,
        Self::Yoga,
        Self::Pilates,
        Self::MartialArts,
        Self::Climbing,
        Self::Squash,
        Self::IceRink,
        Self::Track,
    ];

    /// Stable identifier used in selections and on the command line
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Gym => "gym",
            Self::Park => "park",
            Self::SwimmingPool => "swimming_pool",
            Self::SportsCentre => "sports_centre",
            Self::Tennis => "tennis",
            Self::Football => "football",
            Self::Basketball => "basketball",
            Self::FitnessCentre => "fitness_centre",
            Self::Badminton => "badminton",
            Self::Volleyball => "volleyball",
            Self::Boxing => "boxing",
            Self::Yoga => "yoga",
            Self::Pilates => "pilates",
            Self::MartialArts => "martial_arts",
            Self::Climbing => "climbing",
            Self::Squash => "squash",
            Self::IceRink => "ice_rink",
            Self::Track => "track",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gym => "Gyms",
            Self::Park => "Parks",
            Self::SwimmingPool => "Swimming Pools",
            Self::SportsCentre => "Sports Centers",
            Self::Tennis => "Tennis Courts",
            Self::Football => "Football Fields",
            Self::Basketball => "Basketball Courts",
            Self::FitnessCentre => "Fitness Centers",
            Self::Badminton => "Badminton Courts",
            Self::Volleyball => "Volleyball Courts",
            Self::Boxing => "Boxing Gyms",
            Self::Yoga => "Yoga Studios",
            Self::Pilates => "Pilates Studios",
            Self::MartialArts => "Martial Arts",
            Self::Climbing => "Climbing Walls",
            Self::Squash => "Squash Courts",
            Self::IceRink => "Ice Rinks",
            Self::Track => "Running Tracks",
        }
    }

    /// OpenStreetMap `(key, value)` tag the category is searched by
    #[must_use]
    pub const fn osm_tag(&self) -> (&'static str, &'static str) {
        match self {
            Self::Park => ("leisure", "park"),
            Self::Gym | Self::FitnessCentre => ("amenity", "gym"),
            Self::SwimmingPool => ("amenity", "swimming_pool"),
            Self::SportsCentre => ("leisure", "sports_centre"),
            Self::IceRink => ("sport", "ice_hockey"),
            Self::Track => ("sport", "running"),
            other => ("sport", other.id()),
        }
    }

    /// Look up a category by its identifier
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let needle = id.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.id().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A place returned by a nearby search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyPlace {
    /// Full display name as returned by the geocoder
    pub display_name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Category or free-text query that produced this place
    pub category: String,
    /// Straight-line distance from the search origin, when a distance filter ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl NearbyPlace {
    /// Position of this place
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }

    /// Short name: the first comma-separated part of the display name
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map_or(self.display_name.as_str(), str::trim)
    }
}
