// ABOUTME: Execution of report side effects against the messaging and feedback collaborators
// ABOUTME: NotificationSink trait with logging and recording sinks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use coach_core::errors::AppResult;
use coach_core::models::{NotificationEvent, ReportKind, SideEffect, SubjectId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Destination for report side effects
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Announce that a report is available
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()>;

    /// Mark a subject as needing follow-up
    async fn flag_follow_up(&self, subject_id: SubjectId, report_kind: ReportKind)
        -> AppResult<()>;
}

/// Execute `effects` in order, stopping at the first failure
///
/// Returns the number of effects executed.
///
/// # Errors
///
/// Returns the first error raised by the sink
pub async fn execute_side_effects(
    sink: &dyn NotificationSink,
    effects: &[SideEffect],
) -> AppResult<usize> {
    let mut executed = 0;
    for effect in effects {
        match effect {
            SideEffect::Notify(event) => sink.notify(event).await?,
            SideEffect::FlagFollowUp {
                subject_id,
                report_kind,
            } => sink.flag_follow_up(*subject_id, *report_kind).await?,
            other => {
                warn!(effect = ?other, "Skipping unsupported side effect");
                continue;
            }
        }
        executed += 1;
    }
    Ok(executed)
}

/// Sink that only writes structured log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

#[async_trait]
impl NotificationSink for LoggingSink {
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()> {
        info!(
            subject.id = %event.subject_id,
            report.kind = %event.report_kind,
            generated_at = %event.generated_at,
            "Report available"
        );
        Ok(())
    }

    async fn flag_follow_up(
        &self,
        subject_id: SubjectId,
        report_kind: ReportKind,
    ) -> AppResult<()> {
        info!(subject.id = %subject_id, report.kind = %report_kind, "Follow-up flagged");
        Ok(())
    }
}

/// Sink that keeps every executed effect in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    effects: Arc<RwLock<Vec<SideEffect>>>,
}

impl RecordingSink {
    /// Create an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects executed so far, in order
    pub async fn recorded(&self) -> Vec<SideEffect> {
        self.effects.read().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, event: &NotificationEvent) -> AppResult<()> {
        self.effects
            .write()
            .await
            .push(SideEffect::Notify(event.clone()));
        Ok(())
    }

    async fn flag_follow_up(
        &self,
        subject_id: SubjectId,
        report_kind: ReportKind,
    ) -> AppResult<()> {
        self.effects.write().await.push(SideEffect::FlagFollowUp {
            subject_id,
            report_kind,
        });
        Ok(())
    }
}
