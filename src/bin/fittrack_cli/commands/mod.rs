// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for fittrack-cli
// ABOUTME: Provides the replay, calories, nearby and weather commands

pub mod calories;
pub mod nearby;
pub mod replay;
pub mod weather;
