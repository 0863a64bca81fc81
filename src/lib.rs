// ABOUTME: Main library entry point for the Coach Portal progress analytics engine
// ABOUTME: Wires record-store access, report generation, group trends, and notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Portal
//!
//! Progress analytics and report compilation for coaches and their trainees.
//! Raw measurement samples and workout logs are pulled from a record store,
//! turned into time series, group trends, exercise summaries and chart
//! specifications, and compiled into persistable reports.
//!
//! ## Architecture
//!
//! - **Store**: `SampleStore` and `ReportRepository` traits with in-memory implementations
//! - **Services**: report generation and group trend aggregation
//! - **Notifications**: execution of report side effects
//! - **Config**: environment-driven analytics and logging settings
//!
//! Computation lives in `coach_analytics`; shared types in `coach_core`.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use coach_portal::config::environment::ServerConfig;
//! use coach_portal::services::ReportGenerator;
//! use coach_portal::store::{InMemoryReportRepository, InMemorySampleStore};
//! use std::sync::Arc;
//!
//! let config = ServerConfig::from_env();
//! let generator = ReportGenerator::new(
//!     Arc::new(InMemorySampleStore::new()),
//!     Arc::new(InMemoryReportRepository::new()),
//!     &config.analytics,
//! );
//! ```

/// Environment configuration for analytics and logging
pub mod config;

/// Production logging and structured output
pub mod logging;

/// Report side-effect execution
pub mod notifications;

/// Report generation and group trend services
pub mod services;

/// Record-store traits and in-memory implementations
pub mod store;

/// Re-export of the foundation error types
pub use coach_core::errors;

/// Re-export of the foundation domain models
pub use coach_core::models;

/// Re-export of the foundation constants
pub use coach_core::constants;
