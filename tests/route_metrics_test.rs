// ABOUTME: Integration tests for route geometry, elapsed time and route summaries
// ABOUTME: Validates haversine distances against known fixtures and edge cases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{equator_route, sample_at};
use fittrack::models::{Coordinate, GpsSample, NetworkClass};
use fittrack_metrics::{
    elapsed_seconds, haversine_km, route_segments, route_summary, total_distance_km,
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn test_empty_and_single_sample_routes_have_no_distance() {
    assert!(total_distance_km(&[]).abs() < f64::EPSILON);
    assert!(total_distance_km(&[sample_at(51.5, -0.12, 0)]).abs() < f64::EPSILON);
}

#[test]
fn test_one_degree_of_longitude_on_the_equator() {
    let route = [sample_at(0.0, 0.0, 0), sample_at(0.0, 1.0, 60)];
    let expected = 111.19;
    assert_close(total_distance_km(&route), expected, expected * 0.005);
}

#[test]
fn test_repeated_coordinates_add_nothing() {
    let moving = [sample_at(10.0, 10.0, 0), sample_at(10.0, 10.01, 30)];
    let with_pause = [
        sample_at(10.0, 10.0, 0),
        sample_at(10.0, 10.0, 10),
        sample_at(10.0, 10.0, 20),
        sample_at(10.0, 10.01, 30),
        sample_at(10.0, 10.01, 40),
    ];
    assert_close(total_distance_km(&with_pause), total_distance_km(&moving), 1e-12);
}

#[test]
fn test_distance_sums_consecutive_segments_in_order() {
    let route = equator_route(5);
    let by_hand: f64 = route
        .windows(2)
        .map(|pair| haversine_km(pair[0].coordinate(), pair[1].coordinate()))
        .sum();
    assert_close(total_distance_km(&route), by_hand, 1e-12);
}

#[test]
fn test_haversine_is_symmetric() {
    let copenhagen = Coordinate::new(55.6761, 12.5683);
    let malmo = Coordinate::new(55.6050, 13.0038);
    assert_close(
        haversine_km(copenhagen, malmo),
        haversine_km(malmo, copenhagen),
        1e-12,
    );
}

#[test]
fn test_elapsed_seconds_uses_first_and_last_sample() {
    assert!(elapsed_seconds(&[]).abs() < f64::EPSILON);
    assert!(elapsed_seconds(&[sample_at(0.0, 0.0, 99)]).abs() < f64::EPSILON);

    let route = [
        GpsSample::new(0.0, 0.0, 1_000),
        GpsSample::new(0.0, 0.0, 5_000),
        GpsSample::new(0.0, 0.0, 91_500),
    ];
    assert_close(elapsed_seconds(&route), 90.5, 1e-9);
}

#[test]
fn test_out_of_order_fixes_are_not_resequenced() {
    let route = [sample_at(0.0, 0.0, 120), sample_at(0.0, 0.001, 60)];
    assert_close(elapsed_seconds(&route), -60.0, 1e-9);
}

#[test]
fn test_one_minute_commute_summary() {
    let route = [
        GpsSample::new(0.0, 0.0, 0),
        GpsSample::new(0.0, 0.001, 60_000),
    ];
    let summary = route_summary(&route);
    assert_eq!(summary.point_count, 2);
    assert_close(summary.distance_km, 0.111, 0.001);
    assert_close(summary.elapsed_seconds, 60.0, 1e-9);
    assert_close(summary.average_speed_kmh().unwrap(), 6.67, 0.01);
}

#[test]
fn test_segments_take_the_later_sample_network_class() {
    let route = [
        sample_at(0.0, 0.0, 0).with_network(NetworkClass::TwoG, 0.2),
        sample_at(0.0, 0.001, 60).with_network(NetworkClass::FourG, 20.0),
        sample_at(0.0, 0.002, 120).with_network(NetworkClass::ThreeG, 1.5),
        sample_at(0.0, 0.003, 180),
    ];
    let segments = route_segments(&route);
    let colours: Vec<&str> = segments.iter().map(|segment| segment.colour).collect();
    assert_eq!(colours, ["#10b981", "#f59e0b", "#64748b"]);
    assert_eq!(segments[0].network_class, NetworkClass::FourG);
    assert_eq!(segments[2].to, Coordinate::new(0.0, 0.003));
}

#[test]
fn test_no_segments_below_two_samples() {
    assert!(route_segments(&equator_route(1)).is_empty());
}
