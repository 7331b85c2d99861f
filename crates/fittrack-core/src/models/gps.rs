// ABOUTME: GPS sample model with network link classification
// ABOUTME: One observed location fix as appended to a commute session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Effective link quality reported by the device at capture time
///
/// Only used to colour route segments; never affects metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum NetworkClass {
    /// 4G or better
    FourG,
    /// 3G
    ThreeG,
    /// 2G
    TwoG,
    /// Slow 2G
    SlowTwoG,
    /// Not reported or unrecognised
    #[default]
    Unknown,
}

impl NetworkClass {
    /// Wire label, matching the browser's `effectiveType` values
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FourG => "4g",
            Self::ThreeG => "3g",
            Self::TwoG => "2g",
            Self::SlowTwoG => "slow-2g",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a wire label; anything unrecognised is `Unknown`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "4g" => Self::FourG,
            "3g" => Self::ThreeG,
            "2g" => Self::TwoG,
            "slow-2g" => Self::SlowTwoG,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for NetworkClass {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<NetworkClass> for &'static str {
    fn from(value: NetworkClass) -> Self {
        value.as_str()
    }
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed location fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsSample {
    /// Latitude in degrees
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(rename = "lng")]
    pub longitude: f64,
    /// Capture time in Unix milliseconds
    #[serde(rename = "timestamp")]
    pub captured_at_millis: i64,
    /// Link quality at capture time
    #[serde(rename = "networkType", default)]
    pub network_class: NetworkClass,
    /// Measured downlink in Mbps (informational)
    #[serde(rename = "downlink", default)]
    pub downlink_mbps: f64,
}

impl GpsSample {
    /// Create a sample with unknown network information
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, captured_at_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            captured_at_millis,
            network_class: NetworkClass::Unknown,
            downlink_mbps: 0.0,
        }
    }

    /// Attach network information; negative downlink is clamped to zero
    #[must_use]
    pub fn with_network(mut self, network_class: NetworkClass, downlink_mbps: f64) -> Self {
        self.network_class = network_class;
        self.downlink_mbps = if downlink_mbps.is_finite() {
            downlink_mbps.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Position of this sample
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_sample_document_shape() {
        let sample = GpsSample::new(55.6761, 12.5683, 1_700_000_000_000)
            .with_network(NetworkClass::FourG, 9.5);
        let json = serde_json::to_value(sample).unwrap();
        assert_eq!(json["lat"], 55.6761);
        assert_eq!(json["lng"], 12.5683);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["networkType"], "4g");
        assert_eq!(json["downlink"], 9.5);
    }

    #[test]
    fn test_unrecognised_network_label_is_unknown() {
        let sample: GpsSample = serde_json::from_str(
            r#"{"lat":1.0,"lng":2.0,"timestamp":5,"networkType":"wifi","downlink":3}"#,
        )
        .unwrap();
        assert_eq!(sample.network_class, NetworkClass::Unknown);
    }

    #[test]
    fn test_negative_downlink_clamped() {
        let sample = GpsSample::new(0.0, 0.0, 0).with_network(NetworkClass::ThreeG, -2.0);
        assert!(sample.downlink_mbps.abs() < f64::EPSILON);
    }
}
