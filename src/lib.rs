// ABOUTME: Main library entry point for the FitTrack workout and commute tracker
// ABOUTME: Wires the commute session, collaborator traits, workout logging and ambient config together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitTrack
//!
//! Client core for a fitness tracker: users sign in, log workouts by hand and
//! record commutes from device GPS fixes. Persistence, authentication and
//! live sync are delegated to collaborators behind traits, so the same core
//! runs against the hosted services or the in-memory implementations shipped
//! here.
//!
//! ## Architecture
//!
//! - **session**: `CommuteSession` and `PlaybackState` state machines plus the
//!   async `CommuteTracker` that owns the watch and playback tasks
//! - **positioning**: position sources and network probes
//! - **auth**, **store**, **geo**, **weather**: collaborator contracts with
//!   in-memory and HTTP implementations
//! - **workouts**: form validation, commute logging and the live workout feed
//! - **config**, **logging**: environment configuration and structured logs
//!
//! Route geometry and calorie estimation live in `fittrack-metrics`; errors,
//! models and constants in `fittrack-core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fittrack::errors::AppResult;
//! use fittrack::models::GpsSample;
//! use fittrack_metrics::route_summary;
//!
//! fn main() -> AppResult<()> {
//!     let samples = [GpsSample::new(0.0, 0.0, 0), GpsSample::new(0.0, 0.001, 60_000)];
//!     let summary = route_summary(&samples);
//!     println!("{:.3} km in {} s", summary.distance_km, summary.elapsed_seconds);
//!     Ok(())
//! }
//! ```

/// Authentication collaborator contract and in-memory provider
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Nearby place search over a geocoding collaborator
pub mod geo;

/// Production logging and structured output
pub mod logging;

/// Transient user-facing notices
pub mod notices;

/// Position sources, watch options and network probes
pub mod positioning;

/// Commute session state machines and their async tracker
pub mod session;

/// Document store collaborator contract and in-memory store
pub mod store;

/// Shared HTTP client helpers
pub mod utils;

/// Current weather lookup
pub mod weather;

/// Workout logging and the live workout feed
pub mod workouts;

pub use fittrack_core::{constants, errors, models};
