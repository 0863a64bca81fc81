// ABOUTME: Core types and constants for the Coach Portal analytics platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Core
//!
//! Foundation crate providing shared types and constants for the Coach Portal
//! progress analytics engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `StoreError`
//! - **constants**: Metric names, analytics defaults, and environment keys
//! - **models**: Measurement samples, workouts, report kinds, and notification events

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (samples, subjects, workouts, notifications)
pub mod models;
