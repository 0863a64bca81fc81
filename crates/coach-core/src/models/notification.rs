// ABOUTME: Report kinds and the side effects a report generation hands back to its caller
// ABOUTME: NotificationEvent and follow-up flags are executed outside the pure pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::SubjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of report being generated
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Ad hoc progress report requested by a coach
    #[default]
    Progress,
    /// Scheduled weekly check-in summary
    WeeklyCheckIn,
    /// End-of-program summary; flags the trainee for a feedback follow-up
    ProgramCompletion,
}

impl ReportKind {
    /// Whether generating this kind of report flags the subject for follow-up
    #[must_use]
    pub const fn requires_follow_up(self) -> bool {
        matches!(self, Self::ProgramCompletion)
    }

    /// Stable string form used in logs and storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::WeeklyCheckIn => "weekly_check_in",
            Self::ProgramCompletion => "program_completion",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "progress" => Ok(Self::Progress),
            "weekly_check_in" | "weekly" => Ok(Self::WeeklyCheckIn),
            "program_completion" | "completion" => Ok(Self::ProgramCompletion),
            other => Err(format!("unknown report kind '{other}'")),
        }
    }
}

/// Generation-completion event for the messaging/feedback collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Subject the report was generated for
    pub subject_id: SubjectId,
    /// Kind of the generated report
    pub report_kind: ReportKind,
    /// Generation timestamp of the report
    pub generated_at: DateTime<Utc>,
}

/// Side effect produced by a report generation, executed by the caller
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SideEffect {
    /// Announce that a report is available
    Notify(NotificationEvent),
    /// Mark the subject as needing a follow-up action (feedback prompt)
    FlagFollowUp {
        /// Subject to flag
        subject_id: SubjectId,
        /// Report kind that triggered the flag
        report_kind: ReportKind,
    },
}

impl SideEffect {
    /// Side effects owed for one generated report, in execution order
    #[must_use]
    pub fn for_report(
        subject_id: SubjectId,
        report_kind: ReportKind,
        generated_at: DateTime<Utc>,
    ) -> Vec<Self> {
        let mut effects = vec![Self::Notify(NotificationEvent {
            subject_id,
            report_kind,
            generated_at,
        })];
        if report_kind.requires_follow_up() {
            effects.push(Self::FlagFollowUp {
                subject_id,
                report_kind,
            });
        }
        effects
    }
}
