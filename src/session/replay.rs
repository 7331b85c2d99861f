// ABOUTME: Recorded route files and feeding them back through a commute tracker
// ABOUTME: Loads a JSON array of GPS samples and replays it as position fixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::tracker::CommuteTracker;
use crate::positioning::{ChannelPositionSource, PositionFix};
use fittrack_core::errors::{AppError, AppResult, ErrorCode};
use fittrack_core::models::GpsSample;
use fittrack_metrics::RouteSummary;
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

const DRAIN_POLL: Duration = Duration::from_millis(10);

/// Read a route file holding a JSON array of samples
///
/// # Errors
///
/// Returns `InvalidInput` when the file cannot be read and a serialization
/// error when it is not an array of samples
pub async fn load_samples(path: &Path) -> AppResult<Vec<GpsSample>> {
    let body = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read route file {}", path.display()))
            .with_source(e)
    })?;
    let samples: Vec<GpsSample> = serde_json::from_str(&body)?;
    debug!(path = %path.display(), count = samples.len(), "Route file loaded");
    Ok(samples)
}

/// Record `samples` through `tracker` as if they arrived from the device
///
/// Starts tracking, pushes every sample as a fix, waits until the tracker has
/// appended all of them and stops. Network readings come from the tracker's
/// probe, not from the file.
///
/// # Errors
///
/// Returns the tracker's start error, or `PositionTimeout` when the tracker
/// has not caught up within `wait`
pub async fn replay_route(
    tracker: &mut CommuteTracker,
    source: &ChannelPositionSource,
    samples: &[GpsSample],
    wait: Duration,
) -> AppResult<RouteSummary> {
    tracker.start().await?;

    let mut delivered = 0;
    for sample in samples {
        let fix = PositionFix::new(sample.latitude, sample.longitude, sample.captured_at_millis);
        if source.push(fix).await {
            delivered += 1;
        }
    }

    let drained = timeout(wait, async {
        while tracker.summary().await.point_count < delivered {
            sleep(DRAIN_POLL).await;
        }
    })
    .await;

    let summary = tracker.stop().await;
    if drained.is_err() {
        return Err(AppError::new(
            ErrorCode::PositionTimeout,
            format!(
                "Replay stalled after {} of {delivered} fixes",
                summary.point_count
            ),
        ));
    }
    info!(points = summary.point_count, "Route replayed");
    Ok(summary)
}
