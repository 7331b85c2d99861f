// ABOUTME: Current weather conditions at a coordinate
// ABOUTME: Temperature, wind speed and WMO weather code as reported by the forecast service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};

/// Current weather at a location
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Air temperature in degrees Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    #[serde(alias = "windspeed")]
    pub wind_speed: f64,
    /// WMO weather interpretation code
    #[serde(alias = "weathercode", deserialize_with = "deserialize_wmo_code")]
    pub weather_code: u16,
}

// Some API versions report the code as a float
fn deserialize_wmo_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, f64::from(u16::MAX)) as u16)
}

impl CurrentWeather {
    /// Short description of the WMO code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self.weather_code {
            0 => "Clear sky",
            1..=3 => "Partly cloudy",
            45 | 48 => "Fog",
            51..=57 => "Drizzle",
            61..=67 => "Rain",
            71..=77 => "Snow",
            80..=82 => "Rain showers",
            85 | 86 => "Snow showers",
            95..=99 => "Thunderstorm",
            _ => "Unknown",
        }
    }
}
