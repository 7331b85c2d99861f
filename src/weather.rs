// ABOUTME: Current-weather lookup by coordinate against the Open-Meteo forecast API
// ABOUTME: WeatherLookup trait with an HTTP client implementation and response decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{AppConfig, HttpClientConfig};
use crate::utils::http_client::build_client;
use async_trait::async_trait;
use fittrack_core::constants::service_names::OPEN_METEO;
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::CurrentWeather;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

/// Weather collaborator
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Current conditions at a coordinate
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the request fails or is rejected,
    /// and `ExternalServiceUnavailable` when no current conditions are reported
    async fn current_weather(&self, latitude: f64, longitude: f64) -> AppResult<CurrentWeather>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

/// Decode an Open-Meteo forecast body
///
/// # Errors
///
/// Returns `ExternalServiceError` for malformed JSON and
/// `ExternalServiceUnavailable` when `current_weather` is absent
pub fn parse_forecast_response(body: &str) -> AppResult<CurrentWeather> {
    let forecast: ForecastResponse = serde_json::from_str(body).map_err(|e| {
        AppError::external_service(OPEN_METEO, format!("Failed to parse forecast response: {e}"))
    })?;
    forecast
        .current_weather
        .ok_or_else(|| AppError::external_unavailable(OPEN_METEO, "No weather data received"))
}

/// Client for the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
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
        Self::new(config.weather_base_url.clone(), &config.http)
    }

    /// Forecast URL requesting current conditions
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL does not parse
    pub fn forecast_url(&self, latitude: f64, longitude: f64) -> AppResult<Url> {
        Url::parse_with_params(
            &format!("{}/v1/forecast", self.base_url),
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_owned()),
            ],
        )
        .map_err(|e| {
            AppError::config(format!("Invalid weather base URL {}", self.base_url)).with_source(e)
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenMeteoClient {
    #[instrument(
        skip(self),
        fields(service = "open-meteo", api_call = "current_weather", lat = %latitude, lon = %longitude)
    )]
    async fn current_weather(&self, latitude: f64, longitude: f64) -> AppResult<CurrentWeather> {
        let url = self.forecast_url(latitude, longitude)?;
        debug!(%url, "Fetching current weather");

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::external_service(OPEN_METEO, format!("Weather fetch failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::external_service(
                OPEN_METEO,
                format!("Weather API returned status: {status}"),
            ));
        }

        let body = response.text().await.map_err(|e| {
            AppError::external_service(OPEN_METEO, format!("Failed to read forecast response: {e}"))
        })?;
        parse_forecast_response(&body)
    }
}
