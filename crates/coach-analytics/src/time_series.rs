// ABOUTME: Builds per-metric daily time series from sparse, loosely-typed measurement samples
// ABOUTME: Keeps the first valid sample of each day, sorts by date, and tracks the all-time baseline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use coach_core::models::{DateRange, MeasurementSample, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// One value of a metric on one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Metric value
    pub value: f64,
}

impl TimeSeriesPoint {
    /// Create a point
    #[must_use]
    pub const fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Converts raw samples for a metric into an ordered, de-duplicated series
///
/// Input order is never assumed to be chronological. Samples without a
/// finite numeric value are skipped; when a day has several valid samples
/// the first one encountered is authoritative.
pub struct TimeSeriesBuilder;

impl TimeSeriesBuilder {
    /// Build the series of `metric` restricted to `range`
    pub fn build<'s>(
        metric: &str,
        samples: impl IntoIterator<Item = &'s MeasurementSample>,
        range: &DateRange,
    ) -> Vec<TimeSeriesPoint> {
        let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for sample in samples {
            if sample.metric != metric || !range.contains(sample.date) {
                continue;
            }
            let Some(value) = sample.numeric_value() else {
                trace!(
                    subject.id = %sample.subject_id,
                    metric,
                    date = %sample.date,
                    "Skipping sample without a finite value"
                );
                continue;
            };
            by_day.entry(sample.date).or_insert(value);
        }

        by_day
            .into_iter()
            .map(|(date, value)| TimeSeriesPoint { date, value })
            .collect()
    }

    /// Earliest valid value of `metric`, regardless of any reporting window
    pub fn baseline<'s>(
        metric: &str,
        samples: impl IntoIterator<Item = &'s MeasurementSample>,
    ) -> Option<TimeSeriesPoint> {
        samples
            .into_iter()
            .filter(|sample| sample.metric == metric)
            .filter_map(|sample| {
                sample
                    .numeric_value()
                    .map(|value| TimeSeriesPoint::new(sample.date, value))
            })
            // Replace only on a strictly earlier day: first-seen wins ties
            .fold(None, |earliest: Option<TimeSeriesPoint>, point| match earliest {
                Some(current) if current.date <= point.date => Some(current),
                _ => Some(point),
            })
    }

    /// Build one series per metric in `metrics`, keyed by metric name
    #[must_use]
    pub fn build_all(
        metrics: &[String],
        samples: &[MeasurementSample],
        range: &DateRange,
    ) -> BTreeMap<String, Vec<TimeSeriesPoint>> {
        metrics
            .iter()
            .map(|metric| (metric.clone(), Self::build(metric, samples, range)))
            .collect()
    }

    /// Most recent point of a series built by this builder
    #[must_use]
    pub fn latest(series: &[TimeSeriesPoint]) -> Option<TimeSeriesPoint> {
        series.last().copied()
    }

    /// Split a multi-subject sample batch by subject, preserving input order
    #[must_use]
    pub fn partition_by_subject(
        samples: &[MeasurementSample],
    ) -> HashMap<SubjectId, Vec<&MeasurementSample>> {
        let mut partitions: HashMap<SubjectId, Vec<&MeasurementSample>> = HashMap::new();
        for sample in samples {
            partitions.entry(sample.subject_id).or_default().push(sample);
        }
        partitions
    }
}
