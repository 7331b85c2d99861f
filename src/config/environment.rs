// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses FITTRACK_* variables into a typed AppConfig with warn-and-fallback semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use fittrack_core::constants::playback::DEFAULT_TICK_MS;
use fittrack_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Environment variable names
pub mod vars {
    /// Deployment environment
    pub const ENVIRONMENT: &str = "FITTRACK_ENV";
    /// Application log level
    pub const LOG_LEVEL: &str = "FITTRACK_LOG_LEVEL";
    /// Geocoding service base URL
    pub const GEO_BASE_URL: &str = "FITTRACK_GEO_BASE_URL";
    /// Weather service base URL
    pub const WEATHER_BASE_URL: &str = "FITTRACK_WEATHER_BASE_URL";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "FITTRACK_HTTP_TIMEOUT_SECS";
    /// HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "FITTRACK_HTTP_CONNECT_TIMEOUT_SECS";
    /// Playback tick cadence in milliseconds
    pub const PLAYBACK_TICK_MS: &str = "FITTRACK_PLAYBACK_TICK_MS";
    /// User-Agent sent to public APIs
    pub const USER_AGENT: &str = "FITTRACK_USER_AGENT";
}

/// Default configuration values
pub mod defaults {
    /// Public Nominatim instance
    pub const GEO_BASE_URL: &str = "https://nominatim.openstreetmap.org";
    /// Public Open-Meteo instance
    pub const WEATHER_BASE_URL: &str = "https://api.open-meteo.com";
    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Level from `FITTRACK_LOG_LEVEL`, or `default` when it is unset or blank
    #[must_use]
    pub fn from_env_or(default: Self) -> Self {
        env::var(vars::LOG_LEVEL)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or(default, |value| Self::from_str_or_default(&value))
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(label)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a testing environment
    #[must_use]
    pub const fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
            Self::Testing => f.write_str("testing"),
        }
    }
}

/// Settings shared by the HTTP collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// User-Agent header (Nominatim's usage policy requires one)
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::HTTP_TIMEOUT_SECS,
            connect_timeout_secs: defaults::HTTP_CONNECT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Application log level
    pub log_level: LogLevel,
    /// Geocoding service base URL
    pub geo_base_url: String,
    /// Weather service base URL
    pub weather_base_url: String,
    /// HTTP client settings
    pub http: HttpClientConfig,
    /// Cadence between playback cursor advances, in milliseconds
    pub playback_tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: LogLevel::default(),
            geo_base_url: defaults::GEO_BASE_URL.to_owned(),
            weather_base_url: defaults::WEATHER_BASE_URL.to_owned(),
            http: HttpClientConfig::default(),
            playback_tick_ms: DEFAULT_TICK_MS,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and validate it
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error if a loaded value fails [`Self::validate`]
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                vars::ENVIRONMENT,
                "development",
            )),
            log_level: LogLevel::from_env_or(LogLevel::Info),
            geo_base_url: trim_base_url(&env_var_or(vars::GEO_BASE_URL, defaults::GEO_BASE_URL)),
            weather_base_url: trim_base_url(&env_var_or(
                vars::WEATHER_BASE_URL,
                defaults::WEATHER_BASE_URL,
            )),
            http: HttpClientConfig {
                timeout_secs: env_parse_or(vars::HTTP_TIMEOUT_SECS, defaults::HTTP_TIMEOUT_SECS),
                connect_timeout_secs: env_parse_or(
                    vars::HTTP_CONNECT_TIMEOUT_SECS,
                    defaults::HTTP_CONNECT_TIMEOUT_SECS,
                ),
                user_agent: env::var(vars::USER_AGENT).unwrap_or_else(|_| default_user_agent()),
            },
            playback_tick_ms: env_parse_or(vars::PLAYBACK_TICK_MS, DEFAULT_TICK_MS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would leave a component unusable
    ///
    /// # Errors
    ///
    /// Returns a `ConfigInvalid` error for a zero playback tick, a zero
    /// request timeout or a base URL that does not parse
    pub fn validate(&self) -> AppResult<()> {
        if self.playback_tick_ms == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                vars::PLAYBACK_TICK_MS
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                vars::HTTP_TIMEOUT_SECS
            )));
        }
        for (name, value) in [
            (vars::GEO_BASE_URL, &self.geo_base_url),
            (vars::WEATHER_BASE_URL, &self.weather_base_url),
        ] {
            Url::parse(value).map_err(|e| {
                AppError::config(format!("{name} is not a valid URL: {value}")).with_source(e)
            })?;
        }
        Ok(())
    }

    /// Playback cadence as a `Duration`
    #[must_use]
    pub const fn playback_tick(&self) -> Duration {
        Duration::from_millis(self.playback_tick_ms)
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitTrack Configuration:\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Geocoding: {}\n\
             - Weather: {}\n\
             - HTTP Timeout: {}s (connect {}s)\n\
             - Playback Tick: {}ms",
            self.environment,
            self.log_level,
            self.geo_base_url,
            self.weather_base_url,
            self.http.timeout_secs,
            self.http.connect_timeout_secs,
            self.playback_tick_ms,
        )
    }
}

fn default_user_agent() -> String {
    format!("fittrack/{}", env!("CARGO_PKG_VERSION"))
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a variable, warning and falling back when it is present but malformed
fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {key} value {raw:?}, using default {default}");
            default
        }),
        Err(_) => default,
    }
}

fn trim_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}
