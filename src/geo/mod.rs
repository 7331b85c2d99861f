// ABOUTME: Nearby fitness place search over a geocoding collaborator
// ABOUTME: Visualizer and finder profiles with their own queries, radii, dedupe and ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nearby places
//!
//! Two surfaces search around the user with different rules, and both are
//! kept as distinct [`SearchProfile`]s:
//!
//! - **Visualizer**: free-text `gym`, `park` and `pool` inside a ~2 km box,
//!   labelled with the geocoder's place type and deduplicated by full
//!   display name. Any failed query fails the search.
//! - **Finder**: structured tag queries per selected [`PlaceCategory`],
//!   filtered to 10 km straight-line distance, deduplicated by short name and
//!   sorted nearest first. A failed category is logged and skipped.

/// Nominatim search client
pub mod nominatim;

pub use nominatim::NominatimClient;

use async_trait::async_trait;
use fittrack_core::constants::search::{
    FINDER_LIMIT, FINDER_MAX_DISTANCE_KM, VIEWBOX_HALF_SPAN_DEG, VISUALIZER_LIMIT,
    VISUALIZER_QUERIES,
};
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::{Coordinate, NearbyPlace, PlaceCategory};
use fittrack_metrics::haversine_km;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Rectangular search area in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude
    pub west: f64,
    /// Northern latitude
    pub north: f64,
    /// Eastern longitude
    pub east: f64,
    /// Southern latitude
    pub south: f64,
}

impl BoundingBox {
    /// Square box `half_span_deg` degrees around `center` in each direction
    #[must_use]
    pub fn around(center: Coordinate, half_span_deg: f64) -> Self {
        Self {
            west: center.lng - half_span_deg,
            north: center.lat + half_span_deg,
            east: center.lng + half_span_deg,
            south: center.lat - half_span_deg,
        }
    }

    /// `west,north,east,south`, the geocoder's viewbox parameter
    #[must_use]
    pub fn to_viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryTerm {
    /// Free-text query
    FreeText(String),
    /// Structured `key=value` tag query
    Tag {
        /// Tag key such as `leisure`, `amenity` or `sport`
        key: String,
        /// Tag value
        value: String,
    },
}

impl fmt::Display for QueryTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FreeText(text) => f.write_str(text),
            Self::Tag { key, value } => write!(f, "{key}={value}"),
        }
    }
}

/// How returned places are labelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryLabel {
    /// The geocoder's own place type, or this label when it reports none
    Upstream(String),
    /// Always this label
    Fixed(String),
}

impl CategoryLabel {
    /// Label for a place the geocoder typed as `upstream`
    #[must_use]
    pub fn resolve(&self, upstream: Option<&str>) -> String {
        match self {
            Self::Upstream(fallback) => upstream
                .map(str::trim)
                .filter(|kind| !kind.is_empty())
                .unwrap_or(fallback.as_str())
                .to_owned(),
            Self::Fixed(label) => label.clone(),
        }
    }
}

/// One bounded search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// Search term
    pub term: QueryTerm,
    /// Area results must fall inside
    pub bounds: BoundingBox,
    /// Maximum results
    pub limit: u32,
    /// Category recorded on each returned place
    pub category: CategoryLabel,
}

impl PlaceQuery {
    /// Free-text query as issued by the commute visualizer
    #[must_use]
    pub fn free_text(text: &str, center: Coordinate) -> Self {
        Self {
            term: QueryTerm::FreeText(text.to_owned()),
            bounds: BoundingBox::around(center, VIEWBOX_HALF_SPAN_DEG),
            limit: VISUALIZER_LIMIT,
            category: CategoryLabel::Upstream(text.to_owned()),
        }
    }

    /// Structured category query as issued by the location finder
    #[must_use]
    pub fn for_category(category: PlaceCategory, center: Coordinate) -> Self {
        let (key, value) = category.osm_tag();
        Self {
            term: QueryTerm::Tag {
                key: key.to_owned(),
                value: value.to_owned(),
            },
            bounds: BoundingBox::around(center, VIEWBOX_HALF_SPAN_DEG),
            limit: FINDER_LIMIT,
            category: CategoryLabel::Fixed(category.label().to_owned()),
        }
    }
}

/// Geocoding collaborator
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Places matching the query inside its bounds
    ///
    /// # Errors
    ///
    /// Returns an external service error when the request or its decoding fails
    async fn search(&self, query: &PlaceQuery) -> AppResult<Vec<NearbyPlace>>;
}

/// Which surface's search rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProfile {
    /// Commute visualizer: free text, ~2 km box, no distance filter
    #[default]
    Visualizer,
    /// Location finder: category tags, 10 km filter, nearest first
    Finder,
}

/// Nearby fitness place lookup
#[derive(Clone)]
pub struct NearbySearch {
    places: Arc<dyn PlaceSearch>,
}

impl NearbySearch {
    /// Search through `places`
    #[must_use]
    pub fn new(places: Arc<dyn PlaceSearch>) -> Self {
        Self { places }
    }

    /// Run a profile's search around `center`
    ///
    /// # Errors
    ///
    /// See [`Self::visualizer`] and [`Self::finder`]
    pub async fn search(
        &self,
        profile: SearchProfile,
        center: Coordinate,
        categories: &[PlaceCategory],
    ) -> AppResult<Vec<NearbyPlace>> {
        match profile {
            SearchProfile::Visualizer => self.visualizer(center).await,
            SearchProfile::Finder => self.finder(center, categories).await,
        }
    }

    /// Gyms, parks and pools inside the visualizer box
    ///
    /// # Errors
    ///
    /// Fails as a whole if any of the queries fails
    pub async fn visualizer(&self, center: Coordinate) -> AppResult<Vec<NearbyPlace>> {
        let queries: Vec<PlaceQuery> = VISUALIZER_QUERIES
            .iter()
            .map(|text| PlaceQuery::free_text(text, center))
            .collect();
        let batches = try_join_all(queries.iter().map(|query| self.places.search(query))).await?;

        let places = dedupe_by(batches.into_iter().flatten(), |place| {
            place.display_name.clone()
        });
        info!(count = places.len(), "Nearby locations found");
        Ok(places)
    }

    /// Places of the selected categories within 10 km, nearest first
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no category is selected
    pub async fn finder(
        &self,
        center: Coordinate,
        categories: &[PlaceCategory],
    ) -> AppResult<Vec<NearbyPlace>> {
        if categories.is_empty() {
            return Err(AppError::invalid_input(
                "Please select at least one location type",
            ));
        }

        let mut within_range = Vec::new();
        for &category in categories {
            let query = PlaceQuery::for_category(category, center);
            match self.places.search(&query).await {
                Ok(found) => within_range.extend(found.into_iter().filter_map(|mut place| {
                    let distance = haversine_km(center, place.coordinate());
                    (distance <= FINDER_MAX_DISTANCE_KM).then(|| {
                        place.distance_km = Some(distance);
                        place
                    })
                })),
                Err(error) => warn!(%category, %error, "Category search failed, skipping"),
            }
        }

        let mut places = dedupe_by(within_range, |place| place.short_name().to_owned());
        places.sort_by(|a, b| {
            a.distance_km
                .unwrap_or(f64::MAX)
                .total_cmp(&b.distance_km.unwrap_or(f64::MAX))
        });
        info!(
            count = places.len(),
            "Found {} nearby fitness locations within {FINDER_MAX_DISTANCE_KM}km",
            places.len()
        );
        Ok(places)
    }
}

/// Keep one place per key: first-seen position, last-seen value
fn dedupe_by<I, F>(places: I, key: F) -> Vec<NearbyPlace>
where
    I: IntoIterator<Item = NearbyPlace>,
    F: Fn(&NearbyPlace) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<NearbyPlace> = Vec::new();
    for place in places {
        match index.get(&key(&place)) {
            Some(&slot) => unique[slot] = place,
            None => {
                index.insert(key(&place), unique.len());
                unique.push(place);
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, category: &str) -> NearbyPlace {
        NearbyPlace {
            display_name: name.to_owned(),
            lat: 0.0,
            lon: 0.0,
            category: category.to_owned(),
            distance_km: None,
        }
    }

    #[test]
    fn test_dedupe_keeps_first_position_and_last_value() {
        let places = vec![
            place("Central Park, NYC", "park"),
            place("Gym One", "gym"),
            place("Central Park, NYC", "pool"),
        ];
        let unique = dedupe_by(places, |p| p.display_name.clone());
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].display_name, "Central Park, NYC");
        assert_eq!(unique[0].category, "pool");
        assert_eq!(unique[1].display_name, "Gym One");
    }

    #[test]
    fn test_viewbox_order() {
        let bounds = BoundingBox::around(Coordinate::new(10.0, 20.0), 0.5);
        assert_eq!(bounds.to_viewbox(), "19.5,10.5,20.5,9.5");
    }
}
