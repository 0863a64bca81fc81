// ABOUTME: Tuning parameters for exercise ranking and chart generation
// ABOUTME: Defaults come from coach-core constants; the server overlays environment values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::constants::analytics::{
    CHART_PALETTE, DEFAULT_TOP_EXERCISES, DEFAULT_WINDOW_DAYS, MIN_CHART_POINTS,
};
use serde::{Deserialize, Serialize};

/// Analysis configuration shared by the analyzers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of most frequent exercises summarized
    pub top_exercises: usize,
    /// Minimum points before a series is drawn
    pub min_chart_points: usize,
    /// Reporting window used when only an end date is given
    pub default_window_days: i64,
    /// Series colors, assigned round-robin
    pub chart_palette: Vec<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_exercises: DEFAULT_TOP_EXERCISES,
            min_chart_points: MIN_CHART_POINTS,
            default_window_days: DEFAULT_WINDOW_DAYS,
            chart_palette: CHART_PALETTE.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}
