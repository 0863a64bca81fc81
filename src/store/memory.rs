// ABOUTME: In-memory record store and report repository for the CLI, tests, and benchmarks
// ABOUTME: Shared state behind Arc<tokio::sync::RwLock> so clones observe the same data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ReportRepository, SampleStore, StoreSnapshot};
use async_trait::async_trait;
use coach_analytics::{Report, ReportId};
use coach_core::errors::StoreError;
use coach_core::models::{
    BaselineMap, DateRange, MeasurementSample, SampleValue, SubjectId, WorkoutRecord,
    WorkoutStatus,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct SampleData {
    samples: Vec<MeasurementSample>,
    workouts: Vec<WorkoutRecord>,
    baselines: BaselineMap,
}

/// In-memory [`SampleStore`]
///
/// Queries preserve insertion order; callers must not rely on date order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySampleStore {
    data: Arc<RwLock<SampleData>>,
}

impl InMemorySampleStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with a snapshot
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            data: Arc::new(RwLock::new(SampleData {
                samples: snapshot.samples,
                workouts: snapshot.workouts,
                baselines: snapshot.baselines,
            })),
        }
    }

    /// Append measurement samples
    pub async fn insert_samples(&self, samples: impl IntoIterator<Item = MeasurementSample>) {
        self.data.write().await.samples.extend(samples);
    }

    /// Append a workout record
    pub async fn insert_workout(&self, workout: WorkoutRecord) {
        self.data.write().await.workouts.push(workout);
    }

    /// Set or clear a subject's stored baseline for a metric
    pub async fn set_baseline(
        &self,
        subject_id: SubjectId,
        metric: impl Into<String>,
        value: Option<SampleValue>,
    ) {
        self.data
            .write()
            .await
            .baselines
            .entry(subject_id)
            .or_default()
            .insert(metric.into(), value);
    }
}

#[async_trait]
impl SampleStore for InMemorySampleStore {
    async fn fetch_samples(
        &self,
        subject_ids: &[SubjectId],
        metrics: &[String],
        range: &DateRange,
    ) -> Result<Vec<MeasurementSample>, StoreError> {
        let data = self.data.read().await;
        let samples: Vec<MeasurementSample> = data
            .samples
            .iter()
            .filter(|s| subject_ids.contains(&s.subject_id))
            .filter(|s| metrics.is_empty() || metrics.contains(&s.metric))
            .filter(|s| range.contains(s.date))
            .cloned()
            .collect();
        debug!(
            subjects = subject_ids.len(),
            matched = samples.len(),
            "Fetched measurement samples"
        );
        Ok(samples)
    }

    async fn fetch_workouts(
        &self,
        subject_id: SubjectId,
        status: WorkoutStatus,
        range: &DateRange,
    ) -> Result<Vec<WorkoutRecord>, StoreError> {
        let data = self.data.read().await;
        Ok(data
            .workouts
            .iter()
            .filter(|w| w.subject_id == subject_id && w.status == status)
            .filter(|w| range.contains(w.performed_on))
            .cloned()
            .collect())
    }

    async fn fetch_subject_baselines(
        &self,
        subject_ids: &[SubjectId],
    ) -> Result<BaselineMap, StoreError> {
        let data = self.data.read().await;
        Ok(subject_ids
            .iter()
            .filter_map(|id| data.baselines.get(id).map(|b| (*id, b.clone())))
            .collect())
    }
}

/// In-memory [`ReportRepository`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<Vec<Report>>>,
}

impl InMemoryReportRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports
    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    /// Whether no report has been stored
    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save(&self, report: &Report) -> Result<ReportId, StoreError> {
        let mut reports = self.reports.write().await;
        if reports.iter().any(|r| r.id == report.id) {
            return Err(StoreError::write_failed(
                "reports",
                format!("report {} already exists", report.id),
            ));
        }
        reports.push(report.clone());
        Ok(report.id)
    }

    async fn get(&self, id: ReportId) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_subject(&self, subject_id: SubjectId) -> Result<Vec<Report>, StoreError> {
        let mut reports: Vec<Report> = self
            .reports
            .read()
            .await
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .cloned()
            .collect();
        // Reverse first so equal timestamps list the latest save first
        reports.reverse();
        reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(reports)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use coach_analytics::{ReportAssembler, ReportInputs};
    use coach_core::constants::metrics::WEIGHT;
    use coach_core::models::ReportKind;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn report_at(subject: SubjectId, minutes: i64) -> Report {
        let inputs = ReportInputs {
            subject_id: subject,
            report_kind: ReportKind::Progress,
            period: DateRange::new(day(1), day(28)).unwrap(),
            metrics: &[],
            samples: &[],
            baselines: None,
            workouts: &[],
        };
        ReportAssembler::default().assemble(&inputs, Utc::now() + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_fetch_samples_filters_subject_metric_and_range() {
        let store = InMemorySampleStore::new();
        let a = SubjectId::new();
        let b = SubjectId::new();
        store
            .insert_samples([
                MeasurementSample::new(a, day(3), WEIGHT, 80.0),
                MeasurementSample::new(a, day(3), "waist", 90.0),
                MeasurementSample::new(b, day(3), WEIGHT, 70.0),
                MeasurementSample::new(a, day(30), WEIGHT, 79.0),
            ])
            .await;

        let samples = store
            .fetch_samples(
                &[a],
                &[WEIGHT.to_owned()],
                &DateRange::new(day(1), day(28)).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].numeric_value(), Some(80.0));
    }

    #[tokio::test]
    async fn test_baselines_only_for_known_subjects() {
        let store = InMemorySampleStore::new();
        let a = SubjectId::new();
        store.set_baseline(a, WEIGHT, Some(SampleValue::Number(82.0))).await;

        let baselines = store
            .fetch_subject_baselines(&[a, SubjectId::new()])
            .await
            .unwrap();

        assert_eq!(baselines.len(), 1);
        assert_eq!(baselines[&a][WEIGHT], Some(SampleValue::Number(82.0)));
    }

    #[tokio::test]
    async fn test_reports_listed_newest_first() {
        let repository = InMemoryReportRepository::new();
        let subject = SubjectId::new();
        let older = report_at(subject, 0);
        let newer = report_at(subject, 10);
        let other = report_at(SubjectId::new(), 5);

        repository.save(&newer).await.unwrap();
        repository.save(&older).await.unwrap();
        repository.save(&other).await.unwrap();

        let listed = repository.list_for_subject(subject).await.unwrap();
        let ids: Vec<ReportId> = listed.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(repository.get(other.id).await.unwrap(), Some(other));
    }

    #[tokio::test]
    async fn test_duplicate_save_rejected() {
        let repository = InMemoryReportRepository::new();
        let report = report_at(SubjectId::new(), 0);

        repository.save(&report).await.unwrap();
        let err = repository.save(&report).await.unwrap_err();

        assert!(matches!(err, StoreError::WriteFailed { .. }));
        assert_eq!(repository.len().await, 1);
    }
}
