// ABOUTME: Application constants for metric names, analytics defaults, and environment keys
// ABOUTME: Centralizes tuning values shared by the analytics engine and report services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

/// Measurement metric names as stored in the record store
pub mod metrics {
    /// Body weight in kilograms
    pub const WEIGHT: &str = "weight";
    /// Body fat percentage
    pub const BODY_FAT: &str = "body_fat";
    /// Skeletal muscle mass in kilograms
    pub const MUSCLE_MASS: &str = "muscle_mass";
    /// Waist circumference in centimeters
    pub const WAIST: &str = "waist";

    /// Metrics included in a progress report when the request names none
    pub const DEFAULT_REPORT_METRICS: &[&str] = &[WEIGHT, BODY_FAT, MUSCLE_MASS];

    /// Display unit for a known metric
    #[must_use]
    pub fn unit_for(metric: &str) -> Option<&'static str> {
        match metric {
            WEIGHT | MUSCLE_MASS => Some("kg"),
            BODY_FAT => Some("%"),
            WAIST => Some("cm"),
            _ => None,
        }
    }
}

/// Default tuning values for the analytics engine
pub mod analytics {
    /// Number of most frequent exercises summarized in a report
    pub const DEFAULT_TOP_EXERCISES: usize = 5;
    /// Minimum points a series needs before it can be charted
    pub const MIN_CHART_POINTS: usize = 2;
    /// Reporting window used when a caller gives only an end date
    pub const DEFAULT_WINDOW_DAYS: i64 = 28;
    /// Series colors, assigned round-robin
    pub const CHART_PALETTE: &[&str] = &[
        "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC948",
    ];
}

/// Environment variable names read by configuration loaders
pub mod env_config {
    /// Override for the number of summarized exercises
    pub const TOP_EXERCISES: &str = "COACH_TOP_EXERCISES";
    /// Override for the minimum chartable series length
    pub const MIN_CHART_POINTS: &str = "COACH_MIN_CHART_POINTS";
    /// Override for the default reporting window
    pub const DEFAULT_WINDOW_DAYS: &str = "COACH_DEFAULT_WINDOW_DAYS";
    /// Comma-separated chart palette override
    pub const CHART_PALETTE: &str = "COACH_CHART_PALETTE";
}

/// Service names for structured logging
pub mod service_names {
    /// Name reported in startup logs
    pub const COACH_PORTAL: &str = "coach-portal";
}
