// ABOUTME: Configuration management module for FitTrack runtime settings
// ABOUTME: Environment-driven settings for logging, HTTP collaborators and playback cadence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for FitTrack
//!
//! All settings come from environment variables. Unparseable values fall
//! back to their defaults with a warning; only values that would make a
//! component unusable are rejected by [`AppConfig::validate`].

/// Environment-based configuration
pub mod environment;

pub use environment::{AppConfig, Environment, HttpClientConfig, LogLevel};
