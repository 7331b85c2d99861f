// ABOUTME: Core types and constants for the FitTrack workout and commute tracker
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitTrack Core
//!
//! Foundation crate providing shared types and constants for FitTrack. This
//! crate is designed to change infrequently, enabling incremental compilation
//! benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorCategory`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: GPS samples, workouts, places, weather, and users

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`GpsSample`, `WorkoutRecord`, `NearbyPlace`, etc.)
pub mod models;
