// ABOUTME: Compiles metrics tables, chart specifications, and exercise summaries into reports
// ABOUTME: Pure assembly step; persistence and notifications are handled by the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::chart_spec::{ChartSpec, ChartSpecBuilder, SeriesInput};
use crate::config::AnalyticsConfig;
use crate::exercise_progress::{ExerciseProgressAnalyzer, ExerciseSummary};
use crate::outcome::AnalysisOutcome;
use crate::time_series::{TimeSeriesBuilder, TimeSeriesPoint};
use chrono::{DateTime, NaiveDate, Utc};
use coach_core::constants::metrics::unit_for;
use coach_core::models::{
    DateRange, MeasurementSample, ReportKind, SampleValue, SideEffect, SubjectId, WorkoutRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Title of the body-measurement chart
pub const MEASUREMENTS_CHART_TITLE: &str = "Measurements";

/// Title of the exercise load chart
pub const EXERCISE_CHART_TITLE: &str = "Exercise load";

/// Identifier of a persisted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(Uuid);

impl ReportId {
    /// Generate a fresh report id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One row of the metrics summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// Metric name
    pub metric: String,
    /// Display unit
    pub unit: Option<String>,
    /// Starting value of the subject
    pub baseline: Option<f64>,
    /// Most recent in-period value
    pub latest: Option<f64>,
    /// `latest - baseline`, negative when the value dropped
    pub delta: Option<f64>,
    /// In-period points behind `latest`
    pub points_in_period: usize,
}

impl MetricRow {
    /// Compute a row from a baseline and the in-period series
    #[must_use]
    pub fn compute(metric: &str, baseline: Option<f64>, series: &[TimeSeriesPoint]) -> Self {
        let latest = TimeSeriesBuilder::latest(series).map(|p| p.value);
        let delta = match (baseline, latest) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        };
        Self {
            metric: metric.to_owned(),
            unit: unit_for(metric).map(str::to_owned),
            baseline,
            latest,
            delta,
            points_in_period: series.len(),
        }
    }
}

/// Immutable report document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report identifier
    pub id: ReportId,
    /// Subject the report covers
    pub subject_id: SubjectId,
    /// Report kind
    pub report_kind: ReportKind,
    /// First day of the reporting period
    pub period_start: NaiveDate,
    /// Last day of the reporting period
    pub period_end: NaiveDate,
    /// Baseline / latest / delta per metric
    pub metrics_table: Vec<MetricRow>,
    /// Charts that had enough data to draw
    pub chart_specs: Vec<ChartSpec>,
    /// Most frequent exercises with their period records
    pub exercise_summaries: Vec<ExerciseSummary>,
    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Reporting period as a range
    #[must_use]
    pub const fn period(&self) -> DateRange {
        DateRange {
            start: self.period_start,
            end: self.period_end,
        }
    }

    /// Side effects owed by the caller once this report is persisted
    #[must_use]
    pub fn side_effects(&self) -> Vec<SideEffect> {
        SideEffect::for_report(self.subject_id, self.report_kind, self.generated_at)
    }
}

/// Fetched snapshot a report is compiled from
pub struct ReportInputs<'a> {
    /// Subject the report covers
    pub subject_id: SubjectId,
    /// Report kind
    pub report_kind: ReportKind,
    /// Reporting period
    pub period: DateRange,
    /// Metrics to tabulate and chart, in display order
    pub metrics: &'a [String],
    /// Subject samples through the end of the period (earlier samples feed baselines)
    pub samples: &'a [MeasurementSample],
    /// Stored per-metric baselines of the subject
    pub baselines: Option<&'a HashMap<String, Option<SampleValue>>>,
    /// Completed workouts in the period
    pub workouts: &'a [WorkoutRecord],
}

/// Compiles [`ReportInputs`] into a [`Report`]
pub struct ReportAssembler {
    charts: ChartSpecBuilder,
    exercises: ExerciseProgressAnalyzer,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(&AnalyticsConfig::default())
    }
}

impl ReportAssembler {
    /// Create an assembler from analytics configuration
    #[must_use]
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            charts: ChartSpecBuilder::from_config(config),
            exercises: ExerciseProgressAnalyzer::new(config.top_exercises),
        }
    }

    /// Resolve the subject's baseline for `metric`
    ///
    /// The stored baseline wins when it is a finite number; otherwise the
    /// earliest valid sample is used.
    #[must_use]
    pub fn resolve_baseline(
        metric: &str,
        stored: Option<&HashMap<String, Option<SampleValue>>>,
        samples: &[MeasurementSample],
    ) -> Option<f64> {
        stored
            .and_then(|baselines| baselines.get(metric))
            .and_then(Option::as_ref)
            .and_then(SampleValue::as_finite)
            .or_else(|| TimeSeriesBuilder::baseline(metric, samples).map(|p| p.value))
    }

    /// Assemble a report stamped with `generated_at`
    #[must_use]
    pub fn assemble(&self, inputs: &ReportInputs<'_>, generated_at: DateTime<Utc>) -> Report {
        let series = TimeSeriesBuilder::build_all(inputs.metrics, inputs.samples, &inputs.period);

        let metrics_table: Vec<MetricRow> = inputs
            .metrics
            .iter()
            .map(|metric| {
                let baseline = Self::resolve_baseline(metric, inputs.baselines, inputs.samples);
                let points = series.get(metric).map_or(&[][..], Vec::as_slice);
                MetricRow::compute(metric, baseline, points)
            })
            .collect();

        let exercise_summaries = match self.exercises.analyze(inputs.workouts, &inputs.period) {
            AnalysisOutcome::Computed(summaries) => summaries,
            AnalysisOutcome::InsufficientData(reason) => {
                debug!(%reason, "Exercise section suppressed");
                Vec::new()
            }
        };

        let mut chart_specs = Vec::new();

        let measurement_inputs: Vec<SeriesInput<'_>> = inputs
            .metrics
            .iter()
            .filter_map(|metric| {
                series.get(metric).map(|points| SeriesInput {
                    name: metric,
                    unit: unit_for(metric),
                    points,
                })
            })
            .collect();
        Self::push_chart(
            &mut chart_specs,
            self.charts.line_chart(MEASUREMENTS_CHART_TITLE, &measurement_inputs),
        );

        let exercise_inputs: Vec<SeriesInput<'_>> = exercise_summaries
            .iter()
            .map(|summary| SeriesInput {
                name: &summary.exercise_name,
                unit: Some("kg"),
                points: &summary.weight_trend,
            })
            .collect();
        Self::push_chart(
            &mut chart_specs,
            self.charts.line_chart(EXERCISE_CHART_TITLE, &exercise_inputs),
        );

        Report {
            id: ReportId::new(),
            subject_id: inputs.subject_id,
            report_kind: inputs.report_kind,
            period_start: inputs.period.start,
            period_end: inputs.period.end,
            metrics_table,
            chart_specs,
            exercise_summaries,
            generated_at,
        }
    }

    fn push_chart(charts: &mut Vec<ChartSpec>, outcome: AnalysisOutcome<ChartSpec>) {
        match outcome {
            AnalysisOutcome::Computed(chart) => charts.push(chart),
            AnalysisOutcome::InsufficientData(reason) => {
                debug!(%reason, "Chart suppressed");
            }
        }
    }
}
