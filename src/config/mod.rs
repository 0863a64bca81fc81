// ABOUTME: Configuration module for analytics thresholds and runtime settings
// ABOUTME: Loads everything from environment variables with logged fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Coach Portal
//!
//! - **Environment**: analytics thresholds and logging settings from environment variables

/// Environment-driven configuration
pub mod environment;

pub use environment::ServerConfig;
