// ABOUTME: Record-store abstraction for measurement samples, workouts, baselines, and reports
// ABOUTME: Async traits consumed by the services plus in-memory and snapshot-backed implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record-store access
//!
//! The services never talk to a concrete database. They consume
//! [`SampleStore`] for raw inputs and [`ReportRepository`] for compiled
//! reports, so the hosting application plugs in its own backend.

/// In-memory implementations guarded by `tokio::sync::RwLock`
pub mod memory;

/// JSON snapshot files loaded into the in-memory store
pub mod snapshot;

pub use memory::{InMemoryReportRepository, InMemorySampleStore};
pub use snapshot::StoreSnapshot;

use async_trait::async_trait;
use coach_analytics::{Report, ReportId};
use coach_core::errors::StoreError;
use coach_core::models::{
    BaselineMap, DateRange, MeasurementSample, SubjectId, WorkoutRecord, WorkoutStatus,
};

/// Read access to raw trainee records
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Samples of `subject_ids` dated inside `range`
    ///
    /// An empty `metrics` filter returns every metric.
    async fn fetch_samples(
        &self,
        subject_ids: &[SubjectId],
        metrics: &[String],
        range: &DateRange,
    ) -> Result<Vec<MeasurementSample>, StoreError>;

    /// Workouts of `subject_id` with the given status performed inside `range`
    async fn fetch_workouts(
        &self,
        subject_id: SubjectId,
        status: WorkoutStatus,
        range: &DateRange,
    ) -> Result<Vec<WorkoutRecord>, StoreError>;

    /// Stored per-metric baselines; subjects without any are absent from the map
    async fn fetch_subject_baselines(
        &self,
        subject_ids: &[SubjectId],
    ) -> Result<BaselineMap, StoreError>;
}

/// Persistence for compiled reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a report and return its identifier
    async fn save(&self, report: &Report) -> Result<ReportId, StoreError>;

    /// Load a report by identifier
    async fn get(&self, id: ReportId) -> Result<Option<Report>, StoreError>;

    /// Reports of a subject, newest first
    async fn list_for_subject(&self, subject_id: SubjectId) -> Result<Vec<Report>, StoreError>;
}
