// ABOUTME: Workout records with sectioned exercise entries and per-set results
// ABOUTME: Defines set validity and per-set volume used by exercise progress analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::SubjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a scheduled workout
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    /// Assigned by the coach, not yet performed
    #[default]
    Planned,
    /// Performed and submitted by the trainee
    Completed,
    /// Explicitly skipped
    Skipped,
}

/// One workout as stored by the task-tracking views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Record identifier
    pub id: Uuid,
    /// Trainee who performed the workout
    pub subject_id: SubjectId,
    /// Calendar day the workout was performed
    pub performed_on: NaiveDate,
    /// Workout status
    #[serde(default)]
    pub status: WorkoutStatus,
    /// Section groupings (warm-up, main block, finisher, ...)
    #[serde(default)]
    pub sections: Vec<WorkoutSection>,
}

/// A named grouping of exercises inside a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSection {
    /// Section label as shown to the trainee
    pub name: String,
    /// Exercises in this section
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

/// One exercise prescribed in a section, with its logged sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Exercise name; identity is exact-match on this string
    pub name: String,
    /// Logged sets
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

/// Logged result of one set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SetRecord {
    /// Load in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    /// Repetitions performed
    #[serde(default)]
    pub repetitions: Option<u32>,
    /// Time under work for timed sets
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Whether the trainee ticked the set as done
    #[serde(default)]
    pub completed: bool,
}

impl SetRecord {
    /// Create a weighted set
    #[must_use]
    pub const fn weighted(repetitions: u32, weight: f64, completed: bool) -> Self {
        Self {
            weight: Some(weight),
            repetitions: Some(repetitions),
            duration_seconds: None,
            completed,
        }
    }

    /// Recorded load, when positive and finite
    #[must_use]
    pub fn recorded_weight(&self) -> Option<f64> {
        self.weight.filter(|w| w.is_finite() && *w > 0.0)
    }

    /// Recorded repetitions, when positive
    #[must_use]
    pub fn recorded_repetitions(&self) -> Option<u32> {
        self.repetitions.filter(|r| *r > 0)
    }

    /// A set counts toward analysis when load or repetitions were recorded.
    /// The `completed` tick does not affect validity.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.recorded_weight().is_some() || self.recorded_repetitions().is_some()
    }

    /// Repetitions multiplied by load; zero when either is missing
    #[must_use]
    pub fn volume(&self) -> f64 {
        match (self.recorded_repetitions(), self.recorded_weight()) {
            (Some(reps), Some(weight)) => f64::from(reps) * weight,
            _ => 0.0,
        }
    }
}
