// ABOUTME: Integration tests for nearby place search profiles and the Nominatim client
// ABOUTME: Uses a scripted PlaceSearch to check queries, filtering, dedupe and failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use fittrack::config::HttpClientConfig;
use fittrack::errors::{AppError, AppResult, ErrorCode};
use fittrack::geo::nominatim::parse_search_response;
use fittrack::geo::{
    CategoryLabel, NearbySearch, NominatimClient, PlaceQuery, PlaceSearch, QueryTerm,
    SearchProfile,
};
use fittrack::models::{Coordinate, NearbyPlace, PlaceCategory};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

const ORIGIN: Coordinate = Coordinate::new(0.0, 0.0);

/// Geocoder returning canned results per query term
#[derive(Default)]
struct ScriptedSearch {
    results: HashMap<String, Vec<(&'static str, f64, f64)>>,
    failing: HashSet<String>,
    seen: Mutex<Vec<PlaceQuery>>,
}

impl ScriptedSearch {
    fn with(mut self, term: &str, places: Vec<(&'static str, f64, f64)>) -> Self {
        self.results.insert(term.to_owned(), places);
        self
    }

    fn failing(mut self, term: &str) -> Self {
        self.failing.insert(term.to_owned());
        self
    }

    fn seen(&self) -> Vec<PlaceQuery> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for ScriptedSearch {
    async fn search(&self, query: &PlaceQuery) -> AppResult<Vec<NearbyPlace>> {
        self.seen.lock().unwrap().push(query.clone());
        let term = query.term.to_string();
        if self.failing.contains(&term) {
            return Err(AppError::external_service("Nominatim", "503"));
        }
        Ok(self
            .results
            .get(&term)
            .into_iter()
            .flatten()
            .map(|(name, lat, lon)| NearbyPlace {
                display_name: (*name).to_owned(),
                lat: *lat,
                lon: *lon,
                category: query.category.resolve(None),
                distance_km: None,
            })
            .collect())
    }
}

fn names(places: &[NearbyPlace]) -> Vec<&str> {
    places.iter().map(|p| p.display_name.as_str()).collect()
}

// ============================================================================
// Visualizer profile
// ============================================================================

#[tokio::test]
async fn test_visualizer_queries_gyms_parks_and_pools() {
    let scripted = Arc::new(ScriptedSearch::default());
    let search = NearbySearch::new(scripted.clone());
    search
        .search(SearchProfile::Visualizer, ORIGIN, &[])
        .await
        .unwrap();

    let seen = scripted.seen();
    let terms: Vec<String> = seen.iter().map(|q| q.term.to_string()).collect();
    assert_eq!(terms, ["gym", "park", "pool"]);
    for query in &seen {
        assert_eq!(query.limit, 10);
        assert_eq!(query.bounds.to_viewbox(), "-0.02,0.02,0.02,-0.02");
    }
}

#[tokio::test]
async fn test_visualizer_dedupes_by_full_display_name() {
    let scripted = ScriptedSearch::default()
        .with("gym", vec![("Fit Hub, Main St", 0.001, 0.001)])
        .with(
            "park",
            vec![("Green Park, North", 0.002, 0.0), ("Fit Hub, Main St", 0.001, 0.001)],
        )
        .with("pool", vec![("Green Park, South", 0.003, 0.0)]);
    let search = NearbySearch::new(Arc::new(scripted));

    let places = search.visualizer(ORIGIN).await.unwrap();
    assert_eq!(
        names(&places),
        ["Fit Hub, Main St", "Green Park, North", "Green Park, South"]
    );
    assert_eq!(places[0].category, "park");
    assert!(places.iter().all(|p| p.distance_km.is_none()));
}

#[tokio::test]
async fn test_visualizer_fails_when_any_query_fails() {
    let scripted = ScriptedSearch::default()
        .with("gym", vec![("Fit Hub", 0.001, 0.001)])
        .failing("pool");
    let search = NearbySearch::new(Arc::new(scripted));

    let error = search.visualizer(ORIGIN).await.unwrap_err();
    assert!(error.is_transient());
}

// ============================================================================
// Finder profile
// ============================================================================

#[tokio::test]
async fn test_finder_requires_a_category() {
    let search = NearbySearch::new(Arc::new(ScriptedSearch::default()));
    let error = search
        .search(SearchProfile::Finder, ORIGIN, &[])
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(error.message, "Please select at least one location type");
}

#[tokio::test]
async fn test_finder_filters_dedupes_and_sorts_by_distance() {
    let scripted = ScriptedSearch::default()
        .with(
            "leisure=park",
            vec![
                ("Riverside Park, Old Town", 0.0, 0.05),
                ("Far Away Park, Elsewhere", 0.0, 0.2),
                ("Pocket Park, Old Town", 0.0, 0.01),
            ],
        )
        .with("amenity=gym", vec![("Riverside Park, Sports Hall", 0.0, 0.03)]);
    let scripted = Arc::new(scripted);
    let search = NearbySearch::new(scripted.clone());

    let places = search
        .finder(ORIGIN, &[PlaceCategory::Park, PlaceCategory::Gym])
        .await
        .unwrap();

    assert_eq!(
        names(&places),
        ["Pocket Park, Old Town", "Riverside Park, Sports Hall"]
    );
    assert_eq!(places[1].category, "Gyms");
    let nearest = places[0].distance_km.unwrap();
    assert!((nearest - 1.11).abs() < 0.01, "got {nearest}");
    assert!(places.iter().all(|p| p.distance_km.unwrap() <= 10.0));

    let seen = scripted.seen();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|q| q.limit == 15));
    assert_eq!(
        seen[0].term,
        QueryTerm::Tag {
            key: "leisure".to_owned(),
            value: "park".to_owned()
        }
    );
}

#[tokio::test]
async fn test_finder_skips_failed_categories() {
    let scripted = ScriptedSearch::default()
        .failing("sport=tennis")
        .with("sport=running", vec![("City Track", 0.0, 0.01)]);
    let search = NearbySearch::new(Arc::new(scripted));

    let places = search
        .finder(ORIGIN, &[PlaceCategory::Tennis, PlaceCategory::Track])
        .await
        .unwrap();
    assert_eq!(names(&places), ["City Track"]);
    assert_eq!(places[0].category, "Running Tracks");
}

// ============================================================================
// Nominatim client
// ============================================================================

#[test]
fn test_free_text_search_url() {
    let client = NominatimClient::new("https://geo.example.org/", &HttpClientConfig::default());
    let url = client
        .search_url(&PlaceQuery::free_text("gym", ORIGIN))
        .unwrap();

    assert_eq!(url.path(), "/search");
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(params["format"], "json");
    assert_eq!(params["q"], "gym");
    assert_eq!(params["limit"], "10");
    assert_eq!(params["bounded"], "1");
    assert_eq!(params["viewbox"], "-0.02,0.02,0.02,-0.02");
}

#[test]
fn test_category_search_url_uses_structured_tag() {
    let client = NominatimClient::new("https://geo.example.org", &HttpClientConfig::default());
    let url = client
        .search_url(&PlaceQuery::for_category(PlaceCategory::IceRink, ORIGIN))
        .unwrap();

    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    assert_eq!(params["sport"], "ice_hockey");
    assert_eq!(params["limit"], "15");
    assert!(!params.contains_key("q"));
}

#[test]
fn test_parse_search_response_reads_string_coordinates() {
    let body = r#"[
        {"display_name": "Fit Hub, Main St", "lat": "55.6761", "lon": "12.5683", "type": "gym"},
        {"display_name": "Broken", "lat": "north", "lon": "12.0"}
    ]"#;
    let places = parse_search_response(body, &CategoryLabel::Fixed("Gyms".to_owned())).unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].short_name(), "Fit Hub");
    assert_eq!(places[0].category, "Gyms");
    assert!((places[0].lat - 55.6761).abs() < 1e-9);
}

#[test]
fn test_parse_search_response_rejects_non_array() {
    let label = CategoryLabel::Upstream("gym".to_owned());
    let error = parse_search_response(r#"{"error": "rate limited"}"#, &label).unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[test]
fn test_parse_search_response_labels_with_place_type() {
    let body = r#"[
        {"display_name": "Fit Hub, Main St", "lat": "1.0", "lon": "2.0", "type": "fitness_centre"},
        {"display_name": "Corner Lot", "lat": "1.1", "lon": "2.1"},
        {"display_name": "Blank Type", "lat": "1.2", "lon": "2.2", "type": " "}
    ]"#;
    let places = parse_search_response(body, &CategoryLabel::Upstream("gym".to_owned())).unwrap();
    let categories: Vec<&str> = places.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(categories, ["fitness_centre", "gym", "gym"]);
}

#[test]
fn test_visualizer_queries_keep_upstream_type_and_finder_uses_label() {
    assert_eq!(
        PlaceQuery::free_text("pool", ORIGIN).category,
        CategoryLabel::Upstream("pool".to_owned())
    );
    assert_eq!(
        PlaceQuery::for_category(PlaceCategory::SportsCentre, ORIGIN).category,
        CategoryLabel::Fixed("Sports Centers".to_owned())
    );
}

#[test]
fn test_finder_labels() {
    let labels: Vec<&str> = [
        PlaceCategory::SportsCentre,
        PlaceCategory::Football,
        PlaceCategory::FitnessCentre,
        PlaceCategory::Boxing,
    ]
    .iter()
    .map(PlaceCategory::label)
    .collect();
    assert_eq!(
        labels,
        ["Sports Centers", "Football Fields", "Fitness Centers", "Boxing Gyms"]
    );
}
