// ABOUTME: Integration tests for environment-driven analytics and logging configuration
// ABOUTME: Validates defaults, overrides, and fallback on invalid COACH_* values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use coach_portal::config::environment::analytics_from_env;
use coach_portal::config::ServerConfig;
use coach_portal::constants::{analytics, env_config};
use coach_portal::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::io;
use std::sync::{Arc, Mutex};

/// Log sink shared between a test subscriber and the test body
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const ALL_KEYS: &[&str] = &[
    env_config::TOP_EXERCISES,
    env_config::MIN_CHART_POINTS,
    env_config::DEFAULT_WINDOW_DAYS,
    env_config::CHART_PALETTE,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = analytics_from_env();

    assert_eq!(config.top_exercises, analytics::DEFAULT_TOP_EXERCISES);
    assert_eq!(config.min_chart_points, analytics::MIN_CHART_POINTS);
    assert_eq!(config.default_window_days, analytics::DEFAULT_WINDOW_DAYS);
    assert_eq!(config.chart_palette.len(), analytics::CHART_PALETTE.len());
}

#[test]
#[serial]
fn test_valid_overrides_are_applied() {
    clear_env();
    env::set_var(env_config::TOP_EXERCISES, "3");
    env::set_var(env_config::MIN_CHART_POINTS, " 4 ");
    env::set_var(env_config::DEFAULT_WINDOW_DAYS, "7");
    env::set_var(env_config::CHART_PALETTE, "#000000,#ffffff");

    let config = ServerConfig::from_env().analytics;

    assert_eq!(config.top_exercises, 3);
    assert_eq!(config.min_chart_points, 4);
    assert_eq!(config.default_window_days, 7);
    assert_eq!(config.chart_palette, vec!["#000000", "#ffffff"]);
    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_fall_back_to_defaults() {
    clear_env();
    env::set_var(env_config::TOP_EXERCISES, "many");
    env::set_var(env_config::MIN_CHART_POINTS, "0");
    env::set_var(env_config::DEFAULT_WINDOW_DAYS, "-14");
    env::set_var(env_config::CHART_PALETTE, "#123456,blue");

    let config = analytics_from_env();

    assert_eq!(config.top_exercises, analytics::DEFAULT_TOP_EXERCISES);
    assert_eq!(config.min_chart_points, analytics::MIN_CHART_POINTS);
    assert_eq!(config.default_window_days, analytics::DEFAULT_WINDOW_DAYS);
    assert_eq!(config.chart_palette[0], analytics::CHART_PALETTE[0]);
    clear_env();
}

#[test]
#[serial]
fn test_chart_point_threshold_below_two_falls_back() {
    clear_env();
    env::set_var(env_config::MIN_CHART_POINTS, "1");

    let config = analytics_from_env();

    assert_eq!(config.min_chart_points, analytics::MIN_CHART_POINTS);
    clear_env();
}

#[test]
#[serial]
fn test_fallback_warnings_reach_installed_subscriber() {
    clear_env();
    env::set_var(env_config::MIN_CHART_POINTS, "1");
    env::set_var(env_config::CHART_PALETTE, "#123456,blue");
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || writer.clone())
        .finish();

    let config = tracing::subscriber::with_default(subscriber, analytics_from_env);

    let output = logs.contents();
    assert_eq!(config.min_chart_points, analytics::MIN_CHART_POINTS);
    assert!(output.contains("Invalid configuration value, using default"));
    assert!(output.contains(env_config::MIN_CHART_POINTS));
    assert!(output.contains("Invalid chart color, using default palette"));
    assert!(output.contains("Analytics configuration loaded"));
    clear_env();
}

#[test]
#[serial]
fn test_logging_format_from_environment() {
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");

    let config = LoggingConfig::from_env();

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert_eq!(config.environment, "production");

    env::remove_var("LOG_FORMAT");
    env::remove_var("ENVIRONMENT");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Pretty);
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
}
