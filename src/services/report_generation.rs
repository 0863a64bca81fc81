// ABOUTME: Report generation service: concurrent fetch, assembly, persistence, side effects
// ABOUTME: Aborts without persisting or notifying when any record-store fetch fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::notifications::{execute_side_effects, NotificationSink};
use crate::store::{ReportRepository, SampleStore};
use chrono::{NaiveDate, Utc};
use coach_analytics::{AnalyticsConfig, Report, ReportAssembler, ReportId, ReportInputs};
use coach_core::constants::metrics::DEFAULT_REPORT_METRICS;
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{DateRange, ReportKind, SideEffect, SubjectId, WorkoutStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// What to report on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Subject the report covers
    pub subject_id: SubjectId,
    /// Report kind
    pub report_kind: ReportKind,
    /// Reporting period
    pub period: DateRange,
    /// Metrics to tabulate and chart, in display order
    pub metrics: Vec<String>,
}

impl ReportRequest {
    /// Request a report over `period` with the default body metrics
    #[must_use]
    pub fn new(subject_id: SubjectId, report_kind: ReportKind, period: DateRange) -> Self {
        Self {
            subject_id,
            report_kind,
            period,
            metrics: DEFAULT_REPORT_METRICS.iter().map(|&m| m.to_owned()).collect(),
        }
    }

    /// Request a report over the configured trailing window ending on `end`
    #[must_use]
    pub fn trailing(
        subject_id: SubjectId,
        report_kind: ReportKind,
        end: NaiveDate,
        config: &AnalyticsConfig,
    ) -> Self {
        Self::new(
            subject_id,
            report_kind,
            DateRange::trailing_days(end, config.default_window_days),
        )
    }

    /// Replace the metric set
    #[must_use]
    pub fn with_metrics<I, M>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }
}

/// A persisted report and the side effects owed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReport {
    /// Identifier returned by the repository
    pub report_id: ReportId,
    /// The compiled report
    pub report: Report,
    /// Effects to execute exactly once, in order
    pub side_effects: Vec<SideEffect>,
}

/// Compiles and persists subject reports
pub struct ReportGenerator {
    store: Arc<dyn SampleStore>,
    reports: Arc<dyn ReportRepository>,
    assembler: ReportAssembler,
}

impl ReportGenerator {
    /// Create a generator over the given store and repository
    #[must_use]
    pub fn new(
        store: Arc<dyn SampleStore>,
        reports: Arc<dyn ReportRepository>,
        config: &AnalyticsConfig,
    ) -> Self {
        Self {
            store,
            reports,
            assembler: ReportAssembler::new(config),
        }
    }

    /// Fetch inputs, assemble, and persist one report
    ///
    /// Samples are fetched from the beginning of history up to the period end
    /// so a baseline can be derived when none is stored. The returned side
    /// effects have not been executed.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailed`/`StoreUnavailable` if any fetch fails, in which
    /// case nothing is persisted, or `StorageError` if saving fails
    #[tracing::instrument(
        skip_all,
        fields(subject.id = %request.subject_id, report.kind = %request.report_kind)
    )]
    pub async fn generate(&self, request: &ReportRequest) -> AppResult<GeneratedReport> {
        let subject_ids = [request.subject_id];
        let history = DateRange::through(request.period.end);

        let (samples, workouts, mut baselines) = tokio::try_join!(
            self.store
                .fetch_samples(&subject_ids, &request.metrics, &history),
            self.store.fetch_workouts(
                request.subject_id,
                WorkoutStatus::Completed,
                &request.period
            ),
            self.store.fetch_subject_baselines(&subject_ids),
        )
        .map_err(|e| {
            warn!(error = %e, "Report input fetch failed, aborting generation");
            AppError::from(e).with_resource_id(request.subject_id.to_string())
        })?;

        let subject_baselines = baselines.remove(&request.subject_id);
        let inputs = ReportInputs {
            subject_id: request.subject_id,
            report_kind: request.report_kind,
            period: request.period,
            metrics: &request.metrics,
            samples: &samples,
            baselines: subject_baselines.as_ref(),
            workouts: &workouts,
        };
        let report = self.assembler.assemble(&inputs, Utc::now());

        let report_id = self.reports.save(&report).await?;
        let side_effects = report.side_effects();

        info!(
            report.id = %report_id,
            samples = samples.len(),
            workouts = workouts.len(),
            charts = report.chart_specs.len(),
            exercises = report.exercise_summaries.len(),
            "Report generated"
        );

        Ok(GeneratedReport {
            report_id,
            report,
            side_effects,
        })
    }

    /// Generate a report and execute its side effects through `sink`
    ///
    /// # Errors
    ///
    /// Returns any generation error, or the first sink failure
    pub async fn generate_and_notify(
        &self,
        request: &ReportRequest,
        sink: &dyn NotificationSink,
    ) -> AppResult<GeneratedReport> {
        let generated = self.generate(request).await?;
        execute_side_effects(sink, &generated.side_effects).await?;
        Ok(generated)
    }

    /// Load a persisted report
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no report has this id
    pub async fn get_report(&self, id: ReportId) -> AppResult<Report> {
        self.reports
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report {id}")))
    }

    /// Persisted reports of a subject, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the repository read fails
    pub async fn list_reports(&self, subject_id: SubjectId) -> AppResult<Vec<Report>> {
        Ok(self.reports.list_for_subject(subject_id).await?)
    }
}
