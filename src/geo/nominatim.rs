// ABOUTME: Nominatim search client for bounded free-text and tag queries
// ABOUTME: Builds search URLs and decodes the string-typed coordinates Nominatim returns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{CategoryLabel, PlaceQuery, PlaceSearch, QueryTerm};
use crate::config::{AppConfig, HttpClientConfig};
use crate::utils::http_client::build_client;
use async_trait::async_trait;
use fittrack_core::constants::service_names::NOMINATIM;
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::NearbyPlace;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Decode a Nominatim search response body
///
/// Entries whose coordinates do not parse are skipped. Each place is labelled
/// through `category`, which may use the place `type` Nominatim reports.
///
/// # Errors
///
/// Returns an external service error if the body is not a JSON array of places
pub fn parse_search_response(
    body: &str,
    category: &CategoryLabel,
) -> AppResult<Vec<NearbyPlace>> {
    let raw: Vec<NominatimPlace> = serde_json::from_str(body).map_err(|e| {
        AppError::external_service(NOMINATIM, format!("Failed to parse search response: {e}"))
    })?;

    Ok(raw
        .into_iter()
        .filter_map(|place| {
            let lat = place.lat.trim().parse::<f64>().ok()?;
            let lon = place.lon.trim().parse::<f64>().ok()?;
            Some(NearbyPlace {
                display_name: place.display_name,
                lat,
                lon,
                category: category.resolve(place.kind.as_deref()),
                distance_km: None,
            })
        })
        .collect())
}

/// Client for a Nominatim instance
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    /// Client for `base_url` using the given HTTP settings
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: &HttpClientConfig) -> Self {
        Self {
            client: build_client(http),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Client configured from the application settings
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.geo_base_url.clone(), &config.http)
    }

    /// Full search URL for a query
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse
    pub fn search_url(&self, query: &PlaceQuery) -> AppResult<Url> {
        let mut params: Vec<(String, String)> = vec![("format".into(), "json".into())];
        match &query.term {
            QueryTerm::FreeText(text) => params.push(("q".into(), text.clone())),
            QueryTerm::Tag { key, value } => params.push((key.clone(), value.clone())),
        }
        params.push(("limit".into(), query.limit.to_string()));
        params.push(("bounded".into(), "1".into()));
        params.push(("viewbox".into(), query.bounds.to_viewbox()));

        Url::parse_with_params(&format!("{}/search", self.base_url), &params).map_err(|e| {
            AppError::config(format!("Invalid geocoding base URL {}", self.base_url)).with_source(e)
        })
    }
}

#[async_trait]
impl PlaceSearch for NominatimClient {
    #[instrument(
        skip(self, query),
        fields(service = "nominatim", api_call = "search", term = %query.term)
    )]
    async fn search(&self, query: &PlaceQuery) -> AppResult<Vec<NearbyPlace>> {
        let url = self.search_url(query)?;
        debug!(%url, "Searching nearby places");

        let response = self
            .client
            .get(url)
            .header("Accept-Language", "en")
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(NOMINATIM, format!("Failed to send search request: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                NOMINATIM,
                format!("Search API returned status: {status}"),
            ));
        }

        let body = response.text().await.map_err(|e| {
            AppError::external_service(NOMINATIM, format!("Failed to read search response: {e}"))
        })?;
        parse_search_response(&body, &query.category)
    }
}
