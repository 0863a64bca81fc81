// ABOUTME: Core data models shared by the analytics engine and the report services
// ABOUTME: Re-exports subject, sample, workout, report kind, and notification types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records read from the external sample store (measurements, workouts,
//! baselines) and the small value types the report pipeline produces
//! alongside its documents (report kinds, notification side effects).

mod notification;
mod sample;
mod subject;
mod workout;

pub use notification::{NotificationEvent, ReportKind, SideEffect};
pub use sample::{BaselineMap, MeasurementSample, SampleValue};
pub use subject::{DateRange, SubjectId};
pub use workout::{ExerciseEntry, SetRecord, WorkoutRecord, WorkoutSection, WorkoutStatus};
