// ABOUTME: Extracts per-exercise histories from completed workouts and ranks them by frequency
// ABOUTME: Computes period records: max weight, max repetitions, and max single-occurrence volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::outcome::{AnalysisOutcome, InsufficientData};
use crate::time_series::TimeSeriesPoint;
use chrono::NaiveDate;
use coach_core::models::{DateRange, SetRecord, WorkoutRecord, WorkoutStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

/// One performance of a named exercise within one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseOccurrence {
    /// Exercise name
    pub exercise_name: String,
    /// Workout the occurrence belongs to
    pub workout_id: Uuid,
    /// Day the workout was performed
    pub workout_date: NaiveDate,
    /// Heaviest valid set
    pub max_weight: Option<f64>,
    /// Most repetitions in a valid set
    pub max_repetitions: Option<u32>,
    /// Sum of repetitions x weight over all valid sets
    pub volume: f64,
    /// Number of valid sets
    pub valid_sets: usize,
}

/// Chronological occurrences of one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseHistory {
    /// Exercise name
    pub exercise_name: String,
    /// Occurrences ordered by workout date
    pub occurrences: Vec<ExerciseOccurrence>,
}

impl ExerciseHistory {
    /// Ranking key: number of valid occurrences
    #[must_use]
    pub fn frequency(&self) -> usize {
        self.occurrences.len()
    }
}

/// Period records for one of the most frequent exercises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSummary {
    /// Exercise name
    pub exercise_name: String,
    /// Valid occurrences in the period
    pub occurrence_count: usize,
    /// Heaviest valid set in the period
    pub max_weight: Option<f64>,
    /// Most repetitions in a valid set in the period
    pub max_repetitions: Option<u32>,
    /// Largest single-occurrence volume in the period
    pub max_volume: f64,
    /// Heaviest set per workout day, for charting
    pub weight_trend: Vec<TimeSeriesPoint>,
    /// Largest occurrence volume per workout day, for charting
    pub volume_trend: Vec<TimeSeriesPoint>,
}

impl ExerciseSummary {
    fn from_history(history: &ExerciseHistory) -> Self {
        let max_weight = history
            .occurrences
            .iter()
            .filter_map(|o| o.max_weight)
            .reduce(f64::max);
        let max_repetitions = history
            .occurrences
            .iter()
            .filter_map(|o| o.max_repetitions)
            .max();
        let max_volume = history
            .occurrences
            .iter()
            .map(|o| o.volume)
            .fold(0.0, f64::max);

        Self {
            exercise_name: history.exercise_name.clone(),
            occurrence_count: history.frequency(),
            max_weight,
            max_repetitions,
            max_volume,
            weight_trend: daily_max(
                history
                    .occurrences
                    .iter()
                    .filter_map(|o| o.max_weight.map(|w| (o.workout_date, w))),
            ),
            volume_trend: daily_max(
                history
                    .occurrences
                    .iter()
                    .map(|o| (o.workout_date, o.volume)),
            ),
        }
    }
}

fn daily_max(values: impl Iterator<Item = (NaiveDate, f64)>) -> Vec<TimeSeriesPoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (date, value) in values {
        by_day
            .entry(date)
            .and_modify(|best| *best = best.max(value))
            .or_insert(value);
    }
    by_day
        .into_iter()
        .map(|(date, value)| TimeSeriesPoint::new(date, value))
        .collect()
}

#[derive(Default)]
struct OccurrenceAccumulator {
    max_weight: Option<f64>,
    max_repetitions: Option<u32>,
    volume: f64,
    valid_sets: usize,
}

impl OccurrenceAccumulator {
    fn add(&mut self, set: &SetRecord) {
        if !set.is_valid() {
            return;
        }
        if let Some(weight) = set.recorded_weight() {
            self.max_weight = Some(self.max_weight.map_or(weight, |w| w.max(weight)));
        }
        if let Some(reps) = set.recorded_repetitions() {
            self.max_repetitions = Some(self.max_repetitions.map_or(reps, |r| r.max(reps)));
        }
        self.volume += set.volume();
        self.valid_sets += 1;
    }
}

/// Exercise progress analyzer for a reporting period
pub struct ExerciseProgressAnalyzer {
    top_n: usize,
}

impl ExerciseProgressAnalyzer {
    /// Create an analyzer summarizing the `top_n` most frequent exercises
    #[must_use]
    pub const fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Build the history of every exercise with at least one valid occurrence
    ///
    /// Only completed workouts inside `period` are considered. Entries with
    /// the same name in different sections of a workout form one occurrence.
    /// Histories are returned in order of first appearance.
    #[must_use]
    pub fn histories(workouts: &[WorkoutRecord], period: &DateRange) -> Vec<ExerciseHistory> {
        let mut in_period: Vec<&WorkoutRecord> = workouts
            .iter()
            .filter(|w| w.status == WorkoutStatus::Completed && period.contains(w.performed_on))
            .collect();
        in_period.sort_by_key(|w| w.performed_on);

        let mut histories: Vec<ExerciseHistory> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for workout in in_period {
            let mut order: Vec<&str> = Vec::new();
            let mut accumulators: HashMap<&str, OccurrenceAccumulator> = HashMap::new();

            for entry in workout.sections.iter().flat_map(|s| s.exercises.iter()) {
                let accumulator = accumulators.entry(entry.name.as_str()).or_insert_with(|| {
                    order.push(entry.name.as_str());
                    OccurrenceAccumulator::default()
                });
                for set in &entry.sets {
                    accumulator.add(set);
                }
            }

            for name in order {
                let Some(acc) = accumulators.remove(name) else {
                    continue;
                };
                if acc.valid_sets == 0 {
                    continue;
                }
                let slot = *index.entry(name.to_owned()).or_insert_with(|| {
                    histories.push(ExerciseHistory {
                        exercise_name: name.to_owned(),
                        occurrences: Vec::new(),
                    });
                    histories.len() - 1
                });
                histories[slot].occurrences.push(ExerciseOccurrence {
                    exercise_name: name.to_owned(),
                    workout_id: workout.id,
                    workout_date: workout.performed_on,
                    max_weight: acc.max_weight,
                    max_repetitions: acc.max_repetitions,
                    volume: acc.volume,
                    valid_sets: acc.valid_sets,
                });
            }
        }

        histories
    }

    /// Histories ranked by frequency, most frequent first; ties keep first appearance
    #[must_use]
    pub fn ranked(workouts: &[WorkoutRecord], period: &DateRange) -> Vec<ExerciseHistory> {
        let mut histories = Self::histories(workouts, period);
        histories.sort_by(|a, b| b.frequency().cmp(&a.frequency()));
        histories
    }

    /// Period records of the most frequent exercises
    ///
    /// Yields [`InsufficientData::NoExerciseOccurrences`] when no exercise has
    /// a valid occurrence in `period`.
    #[must_use]
    pub fn analyze(
        &self,
        workouts: &[WorkoutRecord],
        period: &DateRange,
    ) -> AnalysisOutcome<Vec<ExerciseSummary>> {
        let ranked = Self::ranked(workouts, period);
        debug!(
            workouts = workouts.len(),
            exercises = ranked.len(),
            top_n = self.top_n,
            "Ranked exercise histories"
        );
        if ranked.is_empty() {
            return AnalysisOutcome::InsufficientData(InsufficientData::NoExerciseOccurrences);
        }
        AnalysisOutcome::Computed(
            ranked
                .iter()
                .take(self.top_n)
                .map(ExerciseSummary::from_history)
                .collect(),
        )
    }
}
