// ABOUTME: JSON snapshot of raw trainee records used to seed the in-memory store
// ABOUTME: Loaded by the coach-report CLI; every section is optional in the file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use coach_core::errors::{AppError, AppResult, ErrorCode};
use coach_core::models::{BaselineMap, MeasurementSample, WorkoutRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Exported record-store contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Measurement samples in arbitrary order
    #[serde(default)]
    pub samples: Vec<MeasurementSample>,
    /// Workout records of any status
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
    /// Stored per-subject baselines
    #[serde(default)]
    pub baselines: BaselineMap,
}

impl StoreSnapshot {
    /// Parse a snapshot from JSON text
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` when the document does not match the snapshot layout
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            AppError::new(ErrorCode::SerializationError, format!("Invalid snapshot: {e}"))
                .with_source(e)
        })
    }

    /// Read and parse a snapshot file
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read, or
    /// `SerializationError` if it is not a valid snapshot
    pub async fn load(path: &Path) -> AppResult<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::storage(format!("Failed to read snapshot {}", path.display()))
                .with_resource_id(path.display().to_string())
                .with_source(e)
        })?;
        let snapshot = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            samples = snapshot.samples.len(),
            workouts = snapshot.workouts.len(),
            subjects_with_baselines = snapshot.baselines.len(),
            "Loaded store snapshot"
        );
        Ok(snapshot)
    }
}
