// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Weather command for fittrack-cli
// ABOUTME: Fetches current conditions from the configured weather service

use crate::helpers::display::display_weather;
use anyhow::Result;
use fittrack::config::AppConfig;
use fittrack::weather::{OpenMeteoClient, WeatherLookup};

/// Fetch and print current weather at a position
pub async fn run(config: &AppConfig, latitude: f64, longitude: f64) -> Result<()> {
    let client = OpenMeteoClient::from_config(config);
    let weather = client.current_weather(latitude, longitude).await?;
    display_weather(&weather);
    Ok(())
}
