// ABOUTME: Environment configuration management for analytics thresholds and logging
// ABOUTME: Parses COACH_* variables, falling back to defaults with a warning on bad values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::constants::{analytics, env_config};
use crate::logging::LoggingConfig;
use coach_analytics::AnalyticsConfig;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

/// Top-level runtime configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Analytics thresholds
    pub analytics: AnalyticsConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Never fails: unparsable values are logged and replaced by defaults.
    /// Binaries that install a subscriber from [`LoggingConfig::from_env`]
    /// should do so before calling [`analytics_from_env`] so its warnings
    /// are not lost.
    #[must_use]
    pub fn from_env() -> Self {
        let logging = LoggingConfig::from_env();
        Self {
            analytics: analytics_from_env(),
            logging,
        }
    }
}

/// Build [`AnalyticsConfig`] from `COACH_*` environment variables
#[must_use]
pub fn analytics_from_env() -> AnalyticsConfig {
    let config = AnalyticsConfig {
        top_exercises: parse_positive(
            env_config::TOP_EXERCISES,
            analytics::DEFAULT_TOP_EXERCISES,
        ),
        min_chart_points: parse_at_least(
            env_config::MIN_CHART_POINTS,
            analytics::MIN_CHART_POINTS,
            analytics::MIN_CHART_POINTS,
        ),
        default_window_days: parse_positive(
            env_config::DEFAULT_WINDOW_DAYS,
            analytics::DEFAULT_WINDOW_DAYS,
        ),
        chart_palette: parse_palette(&env_var_or(env_config::CHART_PALETTE, "")),
    };
    info!(
        top_exercises = config.top_exercises,
        min_chart_points = config.min_chart_points,
        default_window_days = config.default_window_days,
        palette_size = config.chart_palette.len(),
        "Analytics configuration loaded"
    );
    config
}

fn parse_positive<T>(key: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    parse_with(key, default, |value| value > T::default())
}

fn parse_at_least<T>(key: &str, default: T, minimum: T) -> T
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
{
    parse_with(key, default, |value| value >= minimum)
}

fn parse_with<T>(key: &str, default: T, accept: impl Fn(T) -> bool) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if accept(value) => value,
        _ => {
            warn!(
                key,
                value = %raw,
                default = %default,
                "Invalid configuration value, using default"
            );
            default
        }
    }
}

fn parse_palette(raw: &str) -> Vec<String> {
    let colors: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .map(str::to_owned)
        .collect();

    if colors.is_empty() {
        return default_palette();
    }
    if let Some(bad) = colors.iter().find(|color| !is_hex_color(color)) {
        warn!(
            key = env_config::CHART_PALETTE,
            color = %bad,
            "Invalid chart color, using default palette"
        );
        return default_palette();
    }
    colors
}

fn default_palette() -> Vec<String> {
    analytics::CHART_PALETTE
        .iter()
        .map(|&color| color.to_owned())
        .collect()
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_parsing() {
        assert_eq!(parse_palette("#123456, #abc"), vec!["#123456", "#abc"]);
        assert_eq!(parse_palette(""), default_palette());
        assert_eq!(parse_palette("#123456,red"), default_palette());
    }

    #[test]
    fn test_hex_color_validation() {
        assert!(is_hex_color("#1f77b4"));
        assert!(is_hex_color("#FFF"));
        assert!(!is_hex_color("1f77b4"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#gggggg"));
    }
}
