// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Nearby place search command for fittrack-cli
// ABOUTME: Runs the visualizer or finder profile against the configured geocoder

use crate::helpers::display::display_places;
use anyhow::{bail, Result};
use fittrack::config::AppConfig;
use fittrack::geo::{NearbySearch, NominatimClient, SearchProfile};
use fittrack::models::{Coordinate, PlaceCategory};
use std::sync::Arc;

/// Search and print places around a position
pub async fn run(
    config: &AppConfig,
    latitude: f64,
    longitude: f64,
    profile: SearchProfile,
    category_ids: &[String],
) -> Result<()> {
    let mut categories = Vec::with_capacity(category_ids.len());
    for id in category_ids {
        let Some(category) = PlaceCategory::from_id(id) else {
            let known: Vec<&str> = PlaceCategory::ALL.iter().map(PlaceCategory::id).collect();
            bail!("Unknown category '{id}'. Known categories: {}", known.join(", "));
        };
        categories.push(category);
    }

    let search = NearbySearch::new(Arc::new(NominatimClient::from_config(config)));
    let places = search
        .search(profile, Coordinate::new(latitude, longitude), &categories)
        .await?;
    display_places(&places);
    Ok(())
}
