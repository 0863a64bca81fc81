// ABOUTME: Explicit no-data outcomes returned instead of errors when data is too sparse
// ABOUTME: Lets callers suppress charts and sections without treating sparsity as failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Why an analysis produced no result
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InsufficientData {
    /// A series is too short to show a trend
    #[error("series '{series}' has {points} points, at least {required} required")]
    TooFewPoints {
        /// Series name
        series: String,
        /// Points available
        points: usize,
        /// Points required
        required: usize,
    },
    /// No group member has a valid positive baseline for the metric
    #[error("no qualifying subjects for '{metric}' ({excluded} excluded)")]
    NoQualifyingSubjects {
        /// Metric being aggregated
        metric: String,
        /// Members excluded for lacking a baseline
        excluded: usize,
    },
    /// No exercise had a valid occurrence in the period
    #[error("no valid exercise occurrences in period")]
    NoExerciseOccurrences,
    /// Every series of a chart was omitted
    #[error("chart '{title}' has no chartable series")]
    EmptyChart {
        /// Chart title
        title: String,
    },
}

/// Result of an analysis that may legitimately have nothing to show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum AnalysisOutcome<T> {
    /// The analysis produced a value
    Computed(T),
    /// The inputs were too sparse; callers render a "no data" state
    InsufficientData(InsufficientData),
}

impl<T> AnalysisOutcome<T> {
    /// Whether a value was computed
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// The computed value, discarding the no-data reason
    #[must_use]
    pub fn computed(self) -> Option<T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::InsufficientData(_) => None,
        }
    }

    /// Borrow the computed value
    #[must_use]
    pub const fn as_computed(&self) -> Option<&T> {
        match self {
            Self::Computed(value) => Some(value),
            Self::InsufficientData(_) => None,
        }
    }

    /// The no-data reason, if any
    #[must_use]
    pub const fn insufficient_reason(&self) -> Option<&InsufficientData> {
        match self {
            Self::Computed(_) => None,
            Self::InsufficientData(reason) => Some(reason),
        }
    }
}
