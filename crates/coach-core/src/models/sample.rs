// ABOUTME: Loosely-typed measurement samples and per-subject baselines from the record store
// ABOUTME: SampleValue models form-entered values where only finite numbers are usable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::SubjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw value of a measurement field as written by the onboarding and check-in forms
///
/// Records are loosely typed: a metric field may hold a number, free text
/// (including the empty string), or be absent entirely. Absence is modeled
/// as `Option<SampleValue>::None` by the containing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    /// Numeric value
    Number(f64),
    /// Text value, never coerced to a number
    Text(String),
}

impl SampleValue {
    /// The value when it is a finite number
    #[must_use]
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Number(_) | Self::Text(_) => None,
        }
    }

    /// The value when it is a finite, strictly positive number
    #[must_use]
    pub fn as_positive(&self) -> Option<f64> {
        self.as_finite().filter(|value| *value > 0.0)
    }
}

impl From<f64> for SampleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// One timestamped measurement of one metric for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    /// Subject the measurement belongs to
    pub subject_id: SubjectId,
    /// Calendar day of the measurement
    pub date: NaiveDate,
    /// Metric name (see `constants::metrics`)
    pub metric: String,
    /// Recorded value, if the field was filled in
    #[serde(default)]
    pub value: Option<SampleValue>,
}

impl MeasurementSample {
    /// Create a numeric sample
    #[must_use]
    pub fn new(
        subject_id: SubjectId,
        date: NaiveDate,
        metric: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            subject_id,
            date,
            metric: metric.into(),
            value: Some(SampleValue::Number(value)),
        }
    }

    /// Finite numeric value of this sample, if any
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_ref().and_then(SampleValue::as_finite)
    }
}

/// Stored baseline values, keyed by subject then metric name
pub type BaselineMap = HashMap<SubjectId, HashMap<String, Option<SampleValue>>>;
