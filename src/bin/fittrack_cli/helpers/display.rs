// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for fittrack-cli
// ABOUTME: Consistent display of route summaries, segments, places and weather

use fittrack::models::{CurrentWeather, NearbyPlace};
use fittrack_metrics::{format_clock, format_distance, RouteSegment, RouteSummary};

/// Display route statistics
pub fn display_route_summary(summary: &RouteSummary) {
    println!("\nRoute Summary");
    println!("{}", "=".repeat(50));
    println!("   Points:   {}", summary.point_count);
    println!("   Distance: {}", format_distance(summary.distance_km));
    println!("   Duration: {}", format_clock(summary.elapsed_seconds));
    match summary.average_speed_kmh() {
        Some(speed) => println!("   Speed:    {speed:.1} km/h"),
        None => println!("   Speed:    n/a"),
    }
}

/// Display one line per coloured route segment
pub fn display_segments(segments: &[RouteSegment]) {
    if segments.is_empty() {
        println!("\nNo segments (fewer than two points)");
        return;
    }
    println!("\nSegments");
    println!("{}", "-".repeat(50));
    for (index, segment) in segments.iter().enumerate() {
        println!(
            "{:>4}  ({:.5}, {:.5}) -> ({:.5}, {:.5})  {:<8} {}",
            index + 1,
            segment.from.lat,
            segment.from.lng,
            segment.to.lat,
            segment.to.lng,
            segment.network_class.as_str(),
            segment.colour
        );
    }
}

/// Display a playback cursor position
pub fn display_playback_frame(cursor: usize, total: usize) {
    println!("   Playback {cursor}/{}", total.saturating_sub(1));
}

/// Display search results
pub fn display_places(places: &[NearbyPlace]) {
    if places.is_empty() {
        println!("No fitness locations found nearby");
        return;
    }
    println!("\nFound {} locations", places.len());
    println!("{}", "=".repeat(50));
    for place in places {
        match place.distance_km {
            Some(distance) => println!(
                "   [{}] {} ({})",
                place.category,
                place.short_name(),
                format_distance(distance)
            ),
            None => println!("   [{}] {}", place.category, place.display_name),
        }
    }
}

/// Display current conditions
pub fn display_weather(weather: &CurrentWeather) {
    println!("\nCurrent Weather");
    println!("{}", "=".repeat(50));
    println!("   Conditions:  {}", weather.description());
    println!("   Temperature: {:.1}°C", weather.temperature);
    println!("   Wind:        {:.1} km/h", weather.wind_speed);
}
