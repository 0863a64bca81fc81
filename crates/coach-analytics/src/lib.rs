// ABOUTME: Progress analytics engine for trainee measurements and workout histories
// ABOUTME: Time series building, forward-fill aggregation, exercise ranking, charts, and reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Coach Analytics
//!
//! Pure, synchronous computation over snapshots fetched from the sample
//! store. Nothing in this crate performs I/O; every function is a
//! deterministic transformation of its inputs, so the same request always
//! yields the same series, rankings, and chart specifications.
//!
//! Pipeline:
//! - [`time_series::TimeSeriesBuilder`] turns raw samples into one point per day
//! - [`forward_fill::ForwardFillAggregator`] merges member series into a group trend
//! - [`exercise_progress::ExerciseProgressAnalyzer`] ranks exercises and finds period bests
//! - [`chart_spec::ChartSpecBuilder`] produces renderer-neutral chart specifications
//! - [`report::ReportAssembler`] compiles everything into one [`report::Report`]

/// Analysis tuning (top-N, chart thresholds, palette)
pub mod config;

/// Per-metric time series with first-seen de-duplication
pub mod time_series;

/// Group trend aggregation by carrying last known values forward
pub mod forward_fill;

/// Exercise histories, frequency ranking, and period records
pub mod exercise_progress;

/// Declarative multi-axis line chart specifications
pub mod chart_spec;

/// Metrics tables and report documents
pub mod report;

/// Explicit "no data" outcomes for analyses that cannot produce a result
pub mod outcome;

pub use chart_spec::{AlignedSeries, ChartSpec, ChartSpecBuilder, SeriesInput};
pub use config::AnalyticsConfig;
pub use exercise_progress::{
    ExerciseHistory, ExerciseOccurrence, ExerciseProgressAnalyzer, ExerciseSummary,
};
pub use forward_fill::{AggregateSeries, ForwardFillAggregator, GroupMember};
pub use outcome::{AnalysisOutcome, InsufficientData};
pub use report::{MetricRow, Report, ReportAssembler, ReportId, ReportInputs};
pub use time_series::{TimeSeriesBuilder, TimeSeriesPoint};
