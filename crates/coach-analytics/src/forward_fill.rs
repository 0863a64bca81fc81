// ABOUTME: Merges per-member metric series into one group trend on a shared date axis
// ABOUTME: Carries each member's last known value forward (never interpolates) and sums across members
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Group trend aggregation
//!
//! Members report on different days. To compare the group as a whole, every
//! member contributes a value on every date any member recorded: their most
//! recent in-window sample, or their baseline before their first one. A gap
//! contributes the stale last value, never zero and never an interpolation.

use crate::outcome::{AnalysisOutcome, InsufficientData};
use crate::time_series::TimeSeriesPoint;
use chrono::NaiveDate;
use coach_core::models::{DateRange, SampleValue, SubjectId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One group member's input to the aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Member identifier
    pub subject_id: SubjectId,
    /// Stored baseline for the metric; must be finite and positive to qualify
    pub baseline: Option<SampleValue>,
    /// Member series, ideally already restricted to the reporting window
    pub series: Vec<TimeSeriesPoint>,
}

/// Group-level series produced by [`ForwardFillAggregator`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSeries {
    /// Metric aggregated
    pub metric: String,
    /// Summed values, strictly increasing by date
    pub points: Vec<TimeSeriesPoint>,
    /// Number of members that contributed
    pub member_count: usize,
    /// Members left out for lacking a valid baseline
    pub excluded: Vec<SubjectId>,
}

impl AggregateSeries {
    /// Per-member mean at each point
    #[must_use]
    pub fn average(&self) -> Vec<TimeSeriesPoint> {
        let count = self.member_count.max(1) as f64;
        self.points
            .iter()
            .map(|point| TimeSeriesPoint::new(point.date, point.value / count))
            .collect()
    }

    /// Change between the first and last point
    #[must_use]
    pub fn net_change(&self) -> Option<f64> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some(last.value - first.value),
            _ => None,
        }
    }
}

struct Contributor {
    last_known: f64,
    in_window: BTreeMap<NaiveDate, f64>,
}

/// Forward-fill aggregation across group members
pub struct ForwardFillAggregator;

impl ForwardFillAggregator {
    /// Aggregate `members` over `window`
    ///
    /// The first point sits on the window start and sums every qualifying
    /// member's baseline. A member sample dated exactly on the window start is
    /// an ordinary in-window sample, so that first point then carries it in
    /// place of the member's baseline.
    #[must_use]
    pub fn aggregate(
        metric: &str,
        members: &[GroupMember],
        window: &DateRange,
    ) -> AnalysisOutcome<AggregateSeries> {
        let mut excluded = Vec::new();
        let mut contributors = Vec::with_capacity(members.len());

        for member in members {
            let Some(baseline) = member.baseline.as_ref().and_then(SampleValue::as_positive)
            else {
                debug!(
                    subject.id = %member.subject_id,
                    metric,
                    "Excluding member without a valid baseline"
                );
                excluded.push(member.subject_id);
                continue;
            };

            let mut in_window = BTreeMap::new();
            for point in member.series.iter().filter(|p| window.contains(p.date)) {
                if point.value.is_finite() {
                    in_window.entry(point.date).or_insert(point.value);
                }
            }

            contributors.push(Contributor {
                last_known: baseline,
                in_window,
            });
        }

        if contributors.is_empty() {
            return AnalysisOutcome::InsufficientData(InsufficientData::NoQualifyingSubjects {
                metric: metric.to_owned(),
                excluded: excluded.len(),
            });
        }

        let dates: BTreeSet<NaiveDate> = contributors
            .iter()
            .flat_map(|c| c.in_window.keys().copied())
            .collect();

        let mut points = Vec::with_capacity(dates.len() + 1);
        if !dates.contains(&window.start) {
            points.push(TimeSeriesPoint::new(
                window.start,
                Self::total(&contributors),
            ));
        }

        for date in dates {
            for contributor in &mut contributors {
                if let Some(value) = contributor.in_window.get(&date) {
                    contributor.last_known = *value;
                }
            }
            points.push(TimeSeriesPoint::new(date, Self::total(&contributors)));
        }

        debug!(
            metric,
            members = contributors.len(),
            excluded = excluded.len(),
            points = points.len(),
            "Aggregated group trend"
        );

        AnalysisOutcome::Computed(AggregateSeries {
            metric: metric.to_owned(),
            points,
            member_count: contributors.len(),
            excluded,
        })
    }

    fn total(contributors: &[Contributor]) -> f64 {
        contributors.iter().map(|c| c.last_known).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use coach_core::constants::metrics::WEIGHT;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn window() -> DateRange {
        DateRange::new(day(1), day(28)).unwrap()
    }

    fn member(baseline: Option<SampleValue>, series: &[(u32, f64)]) -> GroupMember {
        GroupMember {
            subject_id: SubjectId::new(),
            baseline,
            series: series
                .iter()
                .map(|&(d, v)| TimeSeriesPoint::new(day(d), v))
                .collect(),
        }
    }

    fn computed(outcome: AnalysisOutcome<AggregateSeries>) -> AggregateSeries {
        match outcome {
            AnalysisOutcome::Computed(series) => series,
            AnalysisOutcome::InsufficientData(reason) => panic!("expected series, got {reason}"),
        }
    }

    #[test]
    fn test_stale_member_contributes_baseline() {
        let a = member(Some(80.0.into()), &[]);
        let b = member(Some(70.0.into()), &[(4, 65.0)]);

        let series = computed(ForwardFillAggregator::aggregate(WEIGHT, &[a, b], &window()));

        assert_eq!(
            series.points,
            vec![
                TimeSeriesPoint::new(day(1), 150.0),
                TimeSeriesPoint::new(day(4), 145.0),
            ]
        );
        assert_eq!(series.member_count, 2);
    }

    #[test]
    fn test_last_value_carried_across_gaps() {
        let a = member(Some(100.0.into()), &[(3, 98.0), (10, 95.0)]);
        let b = member(Some(60.0.into()), &[(6, 61.0)]);

        let series = computed(ForwardFillAggregator::aggregate(WEIGHT, &[a, b], &window()));

        let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![160.0, 158.0, 159.0, 156.0]);
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_invalid_baselines_are_excluded() {
        let a = member(Some(80.0.into()), &[(5, 79.0)]);
        let b = member(Some(70.0.into()), &[(8, 69.0)]);
        let zero = member(Some(0.0.into()), &[(6, 50.0)]);
        let negative = member(Some((-5.0).into()), &[(7, 50.0)]);
        let text = member(Some(SampleValue::Text("seventy".to_owned())), &[(9, 50.0)]);
        let missing = member(None, &[(2, 50.0)]);

        let valid_only = computed(ForwardFillAggregator::aggregate(
            WEIGHT,
            &[a.clone(), b.clone()],
            &window(),
        ));
        let mixed = computed(ForwardFillAggregator::aggregate(
            WEIGHT,
            &[a, zero, b, negative, text, missing],
            &window(),
        ));

        assert_eq!(mixed.points, valid_only.points);
        assert_eq!(mixed.member_count, 2);
        assert_eq!(mixed.excluded.len(), 4);
    }

    #[test]
    fn test_no_qualifying_members_is_insufficient_data() {
        let outcome =
            ForwardFillAggregator::aggregate(WEIGHT, &[member(None, &[(3, 70.0)])], &window());
        assert_eq!(
            outcome.insufficient_reason(),
            Some(&InsufficientData::NoQualifyingSubjects {
                metric: WEIGHT.to_owned(),
                excluded: 1,
            })
        );

        let empty = ForwardFillAggregator::aggregate(WEIGHT, &[], &window());
        assert!(!empty.is_computed());
    }

    #[test]
    fn test_sample_on_window_start_replaces_baseline_in_first_point() {
        let a = member(Some(80.0.into()), &[(1, 78.0)]);
        let b = member(Some(70.0.into()), &[]);

        let series = computed(ForwardFillAggregator::aggregate(WEIGHT, &[a, b], &window()));

        assert_eq!(series.points, vec![TimeSeriesPoint::new(day(1), 148.0)]);
    }

    #[test]
    fn test_out_of_window_points_ignored() {
        let a = member(Some(80.0.into()), &[(29, 60.0)]);
        let window = DateRange::new(day(1), day(28)).unwrap();

        let series = computed(ForwardFillAggregator::aggregate(WEIGHT, &[a], &window));

        assert_eq!(series.points, vec![TimeSeriesPoint::new(day(1), 80.0)]);
    }

    #[test]
    fn test_average_and_net_change() {
        let a = member(Some(80.0.into()), &[]);
        let b = member(Some(70.0.into()), &[(4, 65.0)]);

        let series = computed(ForwardFillAggregator::aggregate(WEIGHT, &[a, b], &window()));

        let average: Vec<f64> = series.average().iter().map(|p| p.value).collect();
        assert_eq!(average, vec![75.0, 72.5]);
        assert_eq!(series.net_change(), Some(-5.0));
    }
}
