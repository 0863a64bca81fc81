// ABOUTME: Subject identifiers and inclusive calendar date ranges for analytics queries
// ABOUTME: SubjectId newtype over UUID and DateRange with validation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a trainee (or any subject whose samples are analyzed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(Uuid);

impl SubjectId {
    /// Generate a fresh random subject id
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

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SubjectId {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| AppError::invalid_input(format!("Invalid subject id '{s}': {e}")))
    }
}

/// Inclusive `[start, end]` range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included in the range
    pub start: NaiveDate,
    /// Last day included in the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::InvalidDateRange` when the range is inverted
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::new(
                ErrorCode::InvalidDateRange,
                format!("Range start {start} is after end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Range covering every day up to and including `end`
    #[must_use]
    pub const fn through(end: NaiveDate) -> Self {
        Self {
            start: NaiveDate::MIN,
            end,
        }
    }

    /// Range starting `days` days before `end`
    #[must_use]
    pub fn trailing_days(end: NaiveDate, days: i64) -> Self {
        let start = end
            .checked_sub_signed(Duration::days(days.max(0)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Whether `date` falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
