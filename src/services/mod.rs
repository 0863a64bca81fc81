// ABOUTME: Domain service layer orchestrating record-store fetches and analytics
// ABOUTME: Report generation and group trend aggregation, reusable from the CLI or a host server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services fetch their inputs concurrently, run the pure analytics engines,
//! and hand results back to the caller. A failed fetch aborts the request
//! before anything is computed or persisted.

/// Per-subject report generation and persistence
pub mod report_generation;

/// Group trend aggregation over a subject scope
pub mod group_trends;

pub use group_trends::{
    AggregationRequest, GroupTrend, GroupTrendReport, GroupTrendService, SubjectScope,
};
pub use report_generation::{GeneratedReport, ReportGenerator, ReportRequest};
