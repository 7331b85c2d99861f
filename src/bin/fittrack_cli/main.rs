// ABOUTME: FitTrack CLI - command-line client for route replay, calorie and nearby place lookups
// ABOUTME: Replays recorded commutes, estimates calories, searches nearby places and fetches weather
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Summarise a recorded commute and print its coloured segments
//! fittrack-cli replay commute.json
//!
//! # Replay it through the tracker with timed playback
//! fittrack-cli replay commute.json --play
//!
//! # Estimate calories with the form's exact-match table
//! fittrack-cli calories Running 30
//!
//! # Estimate calories the way commute logging does
//! fittrack-cli calories "Morning commute" 25 --rates keyword
//!
//! # Nearby gyms, parks and pools
//! fittrack-cli nearby --lat 55.6761 --lon 12.5683
//!
//! # Nearby tennis courts and running tracks within 10 km
//! fittrack-cli nearby --lat 55.6761 --lon 12.5683 --profile finder --category tennis --category track
//!
//! # Current weather
//! fittrack-cli weather --lat 55.6761 --lon 12.5683
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fittrack::config::{AppConfig, LogLevel};
use fittrack::geo::SearchProfile;
use fittrack::logging::LoggingConfig;
use fittrack_metrics::CalorieRates;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "fittrack-cli",
    about = "FitTrack command-line client",
    long_about = "Replay recorded commutes, estimate workout calories, and look up nearby fitness places and current weather."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Summarise a recorded route (JSON array of GPS samples)
    Replay {
        /// Route file
        file: PathBuf,

        /// Replay the route through the tracker with timed playback
        #[arg(long)]
        play: bool,
    },

    /// Estimate calories for an activity
    Calories {
        /// Activity label, e.g. "Running" or "Weight Training"
        activity: String,

        /// Duration in minutes
        minutes: f64,

        /// Rate table to use
        #[arg(long, value_enum, default_value = "exact")]
        rates: RateTable,
    },

    /// Search for fitness places around a position
    Nearby {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Search rules to apply
        #[arg(long, value_enum, default_value = "visualizer")]
        profile: Profile,

        /// Place category id for the finder profile (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
    },

    /// Fetch current weather at a position
    Weather {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RateTable {
    /// Exact match on the workout form vocabulary
    Exact,
    /// Keyword match, as used for commutes
    Keyword,
}

impl From<RateTable> for CalorieRates {
    fn from(table: RateTable) -> Self {
        match table {
            RateTable::Exact => Self::Exact,
            RateTable::Keyword => Self::Keyword,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    /// Gyms, parks and pools in a ~2 km box
    Visualizer,
    /// Selected categories within 10 km, nearest first
    Finder,
}

impl From<Profile> for SearchProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Visualizer => Self::Visualizer,
            Profile::Finder => Self::Finder,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::from_env_or(LogLevel::Warn)
    };
    LoggingConfig::for_cli(&log_level.to_string()).init()?;

    let config = AppConfig::from_env()?;
    debug!(config = %config.summary(), "Configuration loaded");

    match cli.command {
        Command::Replay { file, play } => commands::replay::run(&config, &file, play).await?,
        Command::Calories {
            activity,
            minutes,
            rates,
        } => commands::calories::run(&activity, minutes, rates.into()),
        Command::Nearby {
            lat,
            lon,
            profile,
            categories,
        } => commands::nearby::run(&config, lat, lon, profile.into(), &categories).await?,
        Command::Weather { lat, lon } => commands::weather::run(&config, lat, lon).await?,
    }

    Ok(())
}
