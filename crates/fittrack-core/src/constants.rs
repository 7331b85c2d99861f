// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Geometry, playback cadence, positioning options, search radii and store paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat list.

/// Geometry constants for great-circle calculations
pub mod geo {
    /// Mean Earth radius in kilometres used by the haversine formula
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
    /// Metres per kilometre
    pub const METERS_PER_KM: f64 = 1000.0;
}

/// Time conversion constants
pub mod time {
    /// Milliseconds per second
    pub const MILLIS_PER_SECOND: f64 = 1000.0;
    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
}

/// Route playback constants
pub mod playback {
    /// Default cadence between playback cursor advances
    pub const DEFAULT_TICK_MS: u64 = 300;
    /// Cursor position playback starts from
    pub const START_CURSOR: usize = 1;
    /// Minimum samples required before playback may start
    pub const MIN_SAMPLES: usize = 2;
}

/// Positioning watch defaults
pub mod positioning {
    /// Request a high-accuracy fix
    pub const HIGH_ACCURACY: bool = true;
    /// Maximum wait for a fix in the commute tracker (milliseconds)
    pub const WATCH_TIMEOUT_MS: u64 = 15_000;
    /// Maximum wait for a one-shot fix in the place finder (milliseconds)
    pub const ONE_SHOT_TIMEOUT_MS: u64 = 30_000;
    /// Maximum age of a cached fix (milliseconds)
    pub const MAXIMUM_AGE_MS: u64 = 60_000;
    /// Buffer size of the fix channel between a position source and the tracker
    pub const FIX_CHANNEL_CAPACITY: usize = 64;
}

/// Nearby place search constants
pub mod search {
    /// Half-width of the search viewbox in degrees (~2 km)
    pub const VIEWBOX_HALF_SPAN_DEG: f64 = 0.02;
    /// Result limit for the commute visualizer free-text queries
    pub const VISUALIZER_LIMIT: u32 = 10;
    /// Result limit for the location finder structured queries
    pub const FINDER_LIMIT: u32 = 15;
    /// Straight-line distance threshold applied by the location finder
    pub const FINDER_MAX_DISTANCE_KM: f64 = 10.0;
    /// Free-text queries issued by the commute visualizer
    pub const VISUALIZER_QUERIES: [&str; 3] = ["gym", "park", "pool"];
}

/// Calorie estimation constants
pub mod calories {
    /// Default rate (kcal/min) for unmatched activities in the keyword table
    pub const KEYWORD_DEFAULT_RATE: u32 = 8;
    /// Default rate (kcal/min) for unmatched activities in the exact-match table
    pub const EXACT_DEFAULT_RATE: u32 = 6;
}

/// Document store collection layout
pub mod store {
    /// Root collection holding per-user documents
    pub const USERS_COLLECTION: &str = "users";
    /// Per-user workout collection
    pub const WORKOUTS_COLLECTION: &str = "workouts";
    /// Per-user commute sample collection
    pub const COMMUTES_COLLECTION: &str = "commutes";
    /// Numeric field workouts are ordered by
    pub const TIMESTAMP_FIELD: &str = "timestamp";
}

/// Authentication constants
pub mod auth {
    /// Minimum password length accepted on sign-up
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Provider id for email/password accounts
    pub const PASSWORD_PROVIDER: &str = "password";
    /// Provider id for the federated sign-in flow
    pub const FEDERATED_PROVIDER: &str = "google.com";
}

/// Workout logging constants
pub mod workouts {
    /// Activity label used when a commute is logged as a workout
    pub const COMMUTE_ACTIVITY: &str = "Commute";
}

/// Route rendering colours keyed by network class
pub mod colours {
    /// 4G segment colour
    pub const FOUR_G: &str = "#10b981";
    /// 3G segment colour
    pub const THREE_G: &str = "#f59e0b";
    /// 2G segment colour
    pub const TWO_G: &str = "#ef4444";
    /// Any other network class
    pub const UNKNOWN: &str = "#64748b";
}

/// Service identifiers used in logs and error messages
pub mod service_names {
    /// Service name reported in structured logs
    pub const FITTRACK: &str = "fittrack";
    /// Geocoding service name
    pub const NOMINATIM: &str = "Nominatim";
    /// Weather service name
    pub const OPEN_METEO: &str = "Open-Meteo";
}
