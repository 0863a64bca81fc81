// ABOUTME: coach-report CLI compiling reports and group trends from a JSON store snapshot
// ABOUTME: Loads the snapshot into the in-memory store and prints results as JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Progress report over the default trailing window ending today
//! coach-report --snapshot records.json report --subject 6f1c...
//!
//! # Program completion report over an explicit period
//! coach-report --snapshot records.json report --subject 6f1c... --kind completion \
//!     --start 2025-03-01 --end 2025-05-31
//!
//! # Forward-filled weight trend for a group
//! coach-report --snapshot records.json group-trend --subject 6f1c... --subject 9a2b... \
//!     --metric weight --end 2025-05-31
//! ```

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use coach_portal::config::environment::analytics_from_env;
use coach_portal::constants::metrics::DEFAULT_REPORT_METRICS;
use coach_portal::logging::LoggingConfig;
use coach_portal::models::{DateRange, ReportKind, SubjectId};
use coach_portal::notifications::LoggingSink;
use coach_portal::services::{
    AggregationRequest, GroupTrendService, ReportGenerator, ReportRequest, SubjectScope,
};
use coach_portal::store::{InMemoryReportRepository, InMemorySampleStore, StoreSnapshot};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "coach-report",
    about = "Coach Portal progress analytics",
    long_about = "Compile trainee progress reports and group trends from a JSON record snapshot."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON snapshot with samples, workouts, and baselines
    #[arg(long, short = 's', global = true, default_value = "snapshot.json")]
    snapshot: PathBuf,

    /// Print compact JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compile and persist a report for one subject
    Report {
        /// Subject id
        #[arg(long)]
        subject: SubjectId,

        /// Report kind (progress, weekly, completion)
        #[arg(long, default_value = "progress")]
        kind: ReportKind,

        /// First day of the period; defaults to the configured trailing window
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the period; defaults to today
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Metric to include (repeatable), defaults to weight, body fat, muscle mass
        #[arg(long = "metric")]
        metrics: Vec<String>,
    },

    /// Aggregate a forward-filled trend across subjects
    GroupTrend {
        /// Subject id (repeatable)
        #[arg(long = "subject", required = true)]
        subjects: Vec<SubjectId>,

        /// Metric to aggregate (repeatable)
        #[arg(long = "metric")]
        metrics: Vec<String>,

        /// First day of the window; defaults to the configured trailing window
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the window; defaults to today
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    window_days: i64,
) -> Result<DateRange> {
    let end = end.unwrap_or_else(|| Utc::now().date_naive());
    match start {
        Some(start) => DateRange::new(start, end).context("Invalid period"),
        None => Ok(DateRange::trailing_days(end, window_days)),
    }
}

fn metrics_or_default(metrics: Vec<String>) -> Vec<String> {
    if metrics.is_empty() {
        DEFAULT_REPORT_METRICS.iter().map(|&m| m.to_owned()).collect()
    } else {
        metrics
    }
}

fn render(value: &impl Serialize, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("Failed to serialize output")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    logging.with_stderr().init()?;
    let analytics = analytics_from_env();

    let snapshot = StoreSnapshot::load(&cli.snapshot)
        .await
        .with_context(|| format!("Loading snapshot {}", cli.snapshot.display()))?;
    let store = Arc::new(InMemorySampleStore::from_snapshot(snapshot));

    let output = match cli.command {
        Command::Report {
            subject,
            kind,
            start,
            end,
            metrics,
        } => {
            let period = resolve_range(start, end, analytics.default_window_days)?;
            let request =
                ReportRequest::new(subject, kind, period).with_metrics(metrics_or_default(metrics));
            let generator = ReportGenerator::new(
                store,
                Arc::new(InMemoryReportRepository::new()),
                &analytics,
            );
            let generated = generator
                .generate_and_notify(&request, &LoggingSink)
                .await
                .context("Report generation failed")?;
            info!(report.id = %generated.report_id, "Report compiled");
            render(&generated, cli.compact)?
        }
        Command::GroupTrend {
            subjects,
            metrics,
            start,
            end,
        } => {
            let date_range = resolve_range(start, end, analytics.default_window_days)?;
            let subject_scope = if let [single] = subjects[..] {
                SubjectScope::Single(single)
            } else {
                SubjectScope::Group(subjects)
            };
            let request =
                AggregationRequest::new(subject_scope, metrics_or_default(metrics), date_range);
            let service = GroupTrendService::new(store, &analytics);
            let report = service
                .aggregate(&request)
                .await
                .context("Group trend aggregation failed")?;
            render(&report, cli.compact)?
        }
    };

    println!("{output}");
    Ok(())
}
