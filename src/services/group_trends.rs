// ABOUTME: Group trend service combining member series with forward-fill aggregation
// ABOUTME: Fetches samples and baselines for a subject scope and charts every computed trend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::store::SampleStore;
use coach_analytics::{
    AggregateSeries, AnalysisOutcome, AnalyticsConfig, ChartSpec, ChartSpecBuilder,
    ForwardFillAggregator, GroupMember, SeriesInput, TimeSeriesBuilder,
};
use coach_core::constants::metrics::unit_for;
use coach_core::errors::{AppError, AppResult};
use coach_core::models::{BaselineMap, DateRange, MeasurementSample, SubjectId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Title of the group trend chart
pub const GROUP_CHART_TITLE: &str = "Group trend";

/// Which subjects an aggregation covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "subjects", rename_all = "snake_case")]
pub enum SubjectScope {
    /// One subject
    Single(SubjectId),
    /// A coach's group of subjects
    Group(Vec<SubjectId>),
}

impl SubjectScope {
    /// Subject ids in scope, first occurrence order, without duplicates
    #[must_use]
    pub fn subject_ids(&self) -> Vec<SubjectId> {
        match self {
            Self::Single(id) => vec![*id],
            Self::Group(ids) => {
                let mut unique = Vec::with_capacity(ids.len());
                for id in ids {
                    if !unique.contains(id) {
                        unique.push(*id);
                    }
                }
                unique
            }
        }
    }
}

/// Input to [`GroupTrendService::aggregate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationRequest {
    /// Subjects to aggregate
    pub subject_scope: SubjectScope,
    /// Metrics to aggregate
    pub metric_set: Vec<String>,
    /// Aggregation window
    pub date_range: DateRange,
}

impl AggregationRequest {
    /// Create a request
    #[must_use]
    pub const fn new(
        subject_scope: SubjectScope,
        metric_set: Vec<String>,
        date_range: DateRange,
    ) -> Self {
        Self {
            subject_scope,
            metric_set,
            date_range,
        }
    }

    /// Reject requests with nothing to aggregate
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty scope or metric set
    pub fn validate(&self) -> AppResult<()> {
        if matches!(&self.subject_scope, SubjectScope::Group(ids) if ids.is_empty()) {
            return Err(AppError::invalid_input("Subject scope is empty"));
        }
        if self.metric_set.is_empty() {
            return Err(AppError::invalid_input("Metric set is empty"));
        }
        Ok(())
    }
}

/// Aggregation result of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTrend {
    /// Metric aggregated
    pub metric: String,
    /// Group series, or why it could not be computed
    pub outcome: AnalysisOutcome<AggregateSeries>,
}

/// Result of a group trend request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTrendReport {
    /// Aggregation window
    pub date_range: DateRange,
    /// Subjects in scope
    pub subject_count: usize,
    /// One trend per requested metric, in request order
    pub trends: Vec<GroupTrend>,
    /// Chart of the computed trends
    pub chart: AnalysisOutcome<ChartSpec>,
}

/// Forward-filled group trends over a subject scope
pub struct GroupTrendService {
    store: Arc<dyn SampleStore>,
    charts: ChartSpecBuilder,
}

impl GroupTrendService {
    /// Create a service over the given store
    #[must_use]
    pub fn new(store: Arc<dyn SampleStore>, config: &AnalyticsConfig) -> Self {
        Self {
            store,
            charts: ChartSpecBuilder::from_config(config),
        }
    }

    /// Fetch samples and baselines for the scope and aggregate every metric
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty request, or a fetch error if either
    /// store call fails
    #[tracing::instrument(
        skip_all,
        fields(
            metrics = request.metric_set.len(),
            start = %request.date_range.start,
            end = %request.date_range.end
        )
    )]
    pub async fn aggregate(&self, request: &AggregationRequest) -> AppResult<GroupTrendReport> {
        request.validate()?;
        let subject_ids = request.subject_scope.subject_ids();

        let (samples, baselines) = tokio::try_join!(
            self.store
                .fetch_samples(&subject_ids, &request.metric_set, &request.date_range),
            self.store.fetch_subject_baselines(&subject_ids),
        )
        .map_err(|e| {
            warn!(error = %e, "Group trend fetch failed");
            AppError::from(e)
        })?;

        let trends = Self::compute_trends(request, &subject_ids, &samples, &baselines);

        let inputs: Vec<SeriesInput<'_>> = trends
            .iter()
            .filter_map(|trend| {
                trend.outcome.as_computed().map(|series| SeriesInput {
                    name: &trend.metric,
                    unit: unit_for(&trend.metric),
                    points: &series.points,
                })
            })
            .collect();
        let chart = self.charts.line_chart(GROUP_CHART_TITLE, &inputs);

        info!(
            subjects = subject_ids.len(),
            computed = inputs.len(),
            charted = chart.is_computed(),
            "Group trends aggregated"
        );

        Ok(GroupTrendReport {
            date_range: request.date_range,
            subject_count: subject_ids.len(),
            trends,
            chart,
        })
    }

    /// Aggregate already fetched samples and baselines
    #[must_use]
    pub fn compute_trends(
        request: &AggregationRequest,
        subject_ids: &[SubjectId],
        samples: &[MeasurementSample],
        baselines: &BaselineMap,
    ) -> Vec<GroupTrend> {
        let by_subject = TimeSeriesBuilder::partition_by_subject(samples);

        request
            .metric_set
            .iter()
            .map(|metric| {
                let members: Vec<GroupMember> = subject_ids
                    .iter()
                    .map(|subject_id| GroupMember {
                        subject_id: *subject_id,
                        baseline: baselines
                            .get(subject_id)
                            .and_then(|metrics| metrics.get(metric))
                            .cloned()
                            .flatten(),
                        series: by_subject.get(subject_id).map_or_else(Vec::new, |own| {
                            TimeSeriesBuilder::build(
                                metric,
                                own.iter().copied(),
                                &request.date_range,
                            )
                        }),
                    })
                    .collect();

                GroupTrend {
                    metric: metric.clone(),
                    outcome: ForwardFillAggregator::aggregate(
                        metric,
                        &members,
                        &request.date_range,
                    ),
                }
            })
            .collect()
    }
}
