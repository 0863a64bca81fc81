// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Quiet logging setup, date helpers, workout builders, and a failure-injecting store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `coach_portal`

use async_trait::async_trait;
use chrono::NaiveDate;
use coach_portal::errors::StoreError;
use coach_portal::models::{
    BaselineMap, DateRange, ExerciseEntry, MeasurementSample, SetRecord, SubjectId,
    WorkoutRecord, WorkoutSection, WorkoutStatus,
};
use coach_portal::store::{InMemorySampleStore, SampleStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Day `d` of March 2025
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

/// Inclusive range of March 2025 days
pub fn march(start: u32, end: u32) -> DateRange {
    DateRange::new(day(start), day(end)).unwrap()
}

/// Completed single-section workout of one exercise
pub fn completed_workout(
    subject_id: SubjectId,
    performed_on: NaiveDate,
    exercise: &str,
    sets: Vec<SetRecord>,
) -> WorkoutRecord {
    WorkoutRecord {
        id: Uuid::new_v4(),
        subject_id,
        performed_on,
        status: WorkoutStatus::Completed,
        sections: vec![WorkoutSection {
            name: "Main".to_owned(),
            exercises: vec![ExerciseEntry {
                name: exercise.to_owned(),
                sets,
            }],
        }],
    }
}

/// Store operation a [`FailingSampleStore`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Samples,
    Workouts,
    Baselines,
}

/// Sample store that fails one operation and counts every call
pub struct FailingSampleStore {
    inner: InMemorySampleStore,
    fail_on: FailOn,
    calls: AtomicUsize,
}

impl FailingSampleStore {
    pub fn new(inner: InMemorySampleStore, fail_on: FailOn) -> Self {
        Self {
            inner,
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, operation: FailOn, name: &'static str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if operation == self.fail_on {
            return Err(StoreError::fetch_failed(name, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl SampleStore for FailingSampleStore {
    async fn fetch_samples(
        &self,
        subject_ids: &[SubjectId],
        metrics: &[String],
        range: &DateRange,
    ) -> Result<Vec<MeasurementSample>, StoreError> {
        self.check(FailOn::Samples, "fetch_samples")?;
        self.inner.fetch_samples(subject_ids, metrics, range).await
    }

    async fn fetch_workouts(
        &self,
        subject_id: SubjectId,
        status: WorkoutStatus,
        range: &DateRange,
    ) -> Result<Vec<WorkoutRecord>, StoreError> {
        self.check(FailOn::Workouts, "fetch_workouts")?;
        self.inner.fetch_workouts(subject_id, status, range).await
    }

    async fn fetch_subject_baselines(
        &self,
        subject_ids: &[SubjectId],
    ) -> Result<BaselineMap, StoreError> {
        self.check(FailOn::Baselines, "fetch_subject_baselines")?;
        self.inner.fetch_subject_baselines(subject_ids).await
    }
}
