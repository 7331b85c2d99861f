// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Route replay command for fittrack-cli
// ABOUTME: Summarises a recorded route and optionally plays it back through the tracker

use crate::helpers::display::{display_playback_frame, display_route_summary, display_segments};
use anyhow::Result;
use fittrack::config::AppConfig;
use fittrack::constants::playback::MIN_SAMPLES;
use fittrack::notices::NoticeSender;
use fittrack::positioning::{ChannelPositionSource, StaticNetworkProbe};
use fittrack::session::{load_samples, replay_route, CommuteTracker, TrackerOptions};
use fittrack::store::memory::InMemoryDocumentStore;
use fittrack_metrics::{route_segments, route_summary};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const REPLAY_WAIT: Duration = Duration::from_secs(5);

/// Summarise the route in `file`, replaying it when `play` is set
pub async fn run(config: &AppConfig, file: &Path, play: bool) -> Result<()> {
    let samples = load_samples(file).await?;
    display_route_summary(&route_summary(&samples));
    display_segments(&route_segments(&samples));

    if play {
        play_route(config, &samples).await?;
    }
    Ok(())
}

async fn play_route(config: &AppConfig, samples: &[fittrack::models::GpsSample]) -> Result<()> {
    let source = ChannelPositionSource::new();
    let (notices, _notice_rx) = NoticeSender::channel();
    let options = TrackerOptions::from_config(config);
    let mut tracker = CommuteTracker::new(
        Arc::new(source.clone()),
        Arc::new(StaticNetworkProbe::absent()),
        Arc::new(InMemoryDocumentStore::new()),
        notices,
    )
    .with_options(options);

    replay_route(&mut tracker, &source, samples, REPLAY_WAIT).await?;

    println!("\nPlayback");
    println!("{}", "-".repeat(50));
    let recorded = tracker.samples().await.len();
    if !tracker.play().await {
        // A two-point route finishes on the first frame
        if recorded < MIN_SAMPLES {
            println!("   Nothing to play back (fewer than two points)");
        } else {
            display_playback_frame(tracker.playback_cursor().await, recorded);
        }
        return Ok(());
    }
    loop {
        display_playback_frame(tracker.playback_cursor().await, recorded);
        if !tracker.is_playing().await {
            break;
        }
        sleep(options.playback_tick).await;
    }
    Ok(())
}
