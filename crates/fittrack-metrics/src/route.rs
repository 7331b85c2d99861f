// ABOUTME: Great-circle distance accumulation and elapsed time over ordered GPS samples
// ABOUTME: Also splits a route into network-coloured segments for rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fittrack_core::constants::{colours, geo::EARTH_RADIUS_KM, time::MILLIS_PER_SECOND};
use fittrack_core::models::{Coordinate, GpsSample, NetworkClass};
use serde::{Deserialize, Serialize};

/// Haversine distance between two coordinates in kilometres
///
/// Spherical Earth with radius 6371 km. The formula is reproduced exactly so
/// results compare deterministically across implementations.
#[must_use]
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of haversine distances between consecutive samples, in append order
///
/// Returns `0.0` for fewer than two samples.
#[must_use]
pub fn total_distance_km(samples: &[GpsSample]) -> f64 {
    samples
        .windows(2)
        .map(|pair| haversine_km(pair[0].coordinate(), pair[1].coordinate()))
        .sum()
}

/// Seconds between the first and last sample
///
/// Returns `0.0` for fewer than two samples. Not guarded against out-of-order
/// input: a last sample older than the first yields a negative value.
#[must_use]
pub fn elapsed_seconds(samples: &[GpsSample]) -> f64 {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if samples.len() > 1 => {
            (last.captured_at_millis - first.captured_at_millis) as f64 / MILLIS_PER_SECOND
        }
        _ => 0.0,
    }
}

/// Derived statistics of a recorded route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Number of samples in the route
    pub point_count: usize,
    /// Total great-circle distance in kilometres
    pub distance_km: f64,
    /// Seconds between the first and last sample
    pub elapsed_seconds: f64,
}

impl RouteSummary {
    /// Average speed in km/h, `None` when no time has elapsed
    #[must_use]
    pub fn average_speed_kmh(&self) -> Option<f64> {
        (self.elapsed_seconds > 0.0).then(|| self.distance_km / (self.elapsed_seconds / 3600.0))
    }
}

/// Summarise a route
#[must_use]
pub fn route_summary(samples: &[GpsSample]) -> RouteSummary {
    RouteSummary {
        point_count: samples.len(),
        distance_km: total_distance_km(samples),
        elapsed_seconds: elapsed_seconds(samples),
    }
}

/// One drawable piece of a route between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSegment {
    /// Start of the segment
    pub from: Coordinate,
    /// End of the segment
    pub to: Coordinate,
    /// Network class of the later sample
    pub network_class: NetworkClass,
    /// Hex colour for the network class
    pub colour: &'static str,
}

/// Segment colour for a network class
#[must_use]
pub const fn network_colour(class: NetworkClass) -> &'static str {
    match class {
        NetworkClass::FourG => colours::FOUR_G,
        NetworkClass::ThreeG => colours::THREE_G,
        NetworkClass::TwoG => colours::TWO_G,
        NetworkClass::SlowTwoG | NetworkClass::Unknown => colours::UNKNOWN,
    }
}

/// Split a route into consecutive segments coloured by the later sample's network class
#[must_use]
pub fn route_segments(samples: &[GpsSample]) -> Vec<RouteSegment> {
    samples
        .windows(2)
        .map(|pair| RouteSegment {
            from: pair[0].coordinate(),
            to: pair[1].coordinate(),
            network_class: pair[1].network_class,
            colour: network_colour(pair[1].network_class),
        })
        .collect()
}
