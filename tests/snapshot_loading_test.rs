// ABOUTME: Integration tests for loading JSON store snapshots used by the coach-report CLI
// ABOUTME: Covers file loading, loosely-typed values, malformed files, and end-to-end generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use coach_analytics::AnalyticsConfig;
use coach_portal::constants::metrics::WEIGHT;
use coach_portal::errors::ErrorCode;
use coach_portal::models::{ReportKind, SampleValue, SubjectId};
use coach_portal::services::{ReportGenerator, ReportRequest};
use coach_portal::store::{InMemoryReportRepository, InMemorySampleStore, StoreSnapshot};
use common::{init_test_logging, march};
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const SUBJECT: &str = "6f1c2a4e-8d3b-4c5a-9e7f-0a1b2c3d4e5f";

fn snapshot_json() -> serde_json::Value {
    let mut snapshot = json!({
        "samples": [
            { "subject_id": SUBJECT, "date": "2025-03-10", "metric": "weight", "value": 88.5 },
            { "subject_id": SUBJECT, "date": "2025-03-02", "metric": "weight", "value": "n/a" },
            { "subject_id": SUBJECT, "date": "2025-03-03", "metric": "weight" },
            { "subject_id": SUBJECT, "date": "2025-03-04", "metric": "weight", "value": 90.0 }
        ],
        "workouts": [
            {
                "id": "00000000-0000-4000-8000-000000000001",
                "subject_id": SUBJECT,
                "performed_on": "2025-03-05",
                "status": "completed",
                "sections": [
                    {
                        "name": "Main",
                        "exercises": [
                            { "name": "Squat", "sets": [
                                { "weight": 100.0, "repetitions": 5, "completed": true }
                            ] }
                        ]
                    }
                ]
            }
        ],
        "baselines": {}
    });
    snapshot["baselines"][SUBJECT] = json!({ "weight": 93.0, "body_fat": null });
    snapshot
}

fn write_snapshot(value: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_snapshot_file_loads_all_sections() {
    init_test_logging();
    let file = write_snapshot(&snapshot_json());

    let snapshot = StoreSnapshot::load(file.path()).await.unwrap();
    let subject: SubjectId = SUBJECT.parse().unwrap();

    assert_eq!(snapshot.samples.len(), 4);
    assert_eq!(
        snapshot.samples[1].value,
        Some(SampleValue::Text("n/a".to_owned()))
    );
    assert_eq!(snapshot.samples[2].value, None);
    assert_eq!(snapshot.workouts.len(), 1);
    assert_eq!(
        snapshot.baselines[&subject][WEIGHT],
        Some(SampleValue::Number(93.0))
    );
    assert_eq!(snapshot.baselines[&subject]["body_fat"], None);
}

#[tokio::test]
async fn test_missing_sections_default_to_empty() {
    init_test_logging();
    let file = write_snapshot(&json!({}));

    let snapshot = StoreSnapshot::load(file.path()).await.unwrap();

    assert_eq!(snapshot, StoreSnapshot::default());
}

#[tokio::test]
async fn test_malformed_and_missing_files_are_errors() {
    init_test_logging();
    let file = write_snapshot(&json!({ "samples": "not a list" }));

    let malformed = StoreSnapshot::load(file.path()).await.unwrap_err();
    let dir = tempfile::tempdir().unwrap();
    let missing = StoreSnapshot::load(&dir.path().join("absent.json"))
        .await
        .unwrap_err();

    assert_eq!(malformed.code, ErrorCode::SerializationError);
    assert_eq!(missing.code, ErrorCode::StorageError);
    assert!(missing.resource_id.is_some());
}

#[tokio::test]
async fn test_report_from_snapshot() {
    init_test_logging();
    let file = write_snapshot(&snapshot_json());
    let snapshot = StoreSnapshot::load(file.path()).await.unwrap();
    let subject: SubjectId = SUBJECT.parse().unwrap();

    let generator = ReportGenerator::new(
        Arc::new(InMemorySampleStore::from_snapshot(snapshot)),
        Arc::new(InMemoryReportRepository::new()),
        &AnalyticsConfig::default(),
    );
    let generated = generator
        .generate(
            &ReportRequest::new(subject, ReportKind::Progress, march(1, 31)).with_metrics([WEIGHT]),
        )
        .await
        .unwrap();

    let row = &generated.report.metrics_table[0];
    assert_eq!(row.baseline, Some(93.0));
    assert_eq!(row.latest, Some(88.5));
    assert_eq!(row.points_in_period, 2);
    assert_eq!(generated.report.exercise_summaries.len(), 1);

    let json = serde_json::to_value(&generated).unwrap();
    assert_eq!(json["side_effects"][0]["type"], "notify");
    assert_eq!(json["report"]["chart_specs"][0]["title"], "Measurements");
}
