// ABOUTME: Shared HTTP client utilities with connection pooling and timeout configuration
// ABOUTME: Builds reqwest clients for the public geocoding and weather APIs from HttpClientConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Create a client for the public collaborator APIs
///
/// Sets timeouts and the User-Agent header the Nominatim usage policy
/// requires. Falls back to a client with the same timeouts and no
/// User-Agent if the builder fails.
#[must_use]
pub fn build_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to create configured HTTP client: {e}, using defaults");
            create_client_with_timeout(config.timeout_secs, config.connect_timeout_secs)
        })
}
