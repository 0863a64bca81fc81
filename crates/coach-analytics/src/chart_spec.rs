// ABOUTME: Declarative multi-axis line chart specifications for an external renderer
// ABOUTME: Aligns series onto a shared date axis and gives each series its own y-axis and color
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Chart specifications
//!
//! The renderer is an external service; this module only decides *what* to
//! draw. Metrics of different scale (kilograms, percent, repetitions) share
//! one chart, so every series gets an independent y-axis. Series with fewer
//! than the configured minimum of points are dropped from the chart and
//! listed in [`ChartSpec::omitted_series`] with their point counts.

use crate::config::AnalyticsConfig;
use crate::outcome::{AnalysisOutcome, InsufficientData};
use crate::time_series::TimeSeriesPoint;
use chrono::NaiveDate;
use coach_core::constants::analytics::{CHART_PALETTE, MIN_CHART_POINTS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Date format used for x-axis labels
const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Fallback series color when the configured palette is empty
const FALLBACK_COLOR: &str = "#4E79A7";

/// Named series handed to [`ChartSpecBuilder::line_chart`]
#[derive(Debug, Clone, Copy)]
pub struct SeriesInput<'a> {
    /// Series label
    pub name: &'a str,
    /// Display unit, used as the y-axis title suffix
    pub unit: Option<&'a str>,
    /// Series points in date order
    pub points: &'a [TimeSeriesPoint],
}

/// One series aligned onto a shared axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    /// Series label
    pub name: String,
    /// Display unit
    pub unit: Option<String>,
    /// One slot per shared label; `None` where the series has no point
    pub values: Vec<Option<f64>>,
}

impl NamedSeries {
    /// Number of actual (non-gap) points
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

/// Several series sharing one date axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    /// Shared, strictly increasing date axis
    pub dates: Vec<NaiveDate>,
    /// Series values aligned to `dates`
    pub series: Vec<NamedSeries>,
}

impl AlignedSeries {
    /// Align `inputs` onto the union of their dates
    ///
    /// Missing dates become gaps; values are never filled or interpolated.
    #[must_use]
    pub fn align(inputs: &[SeriesInput<'_>]) -> Self {
        let dates: Vec<NaiveDate> = inputs
            .iter()
            .flat_map(|input| input.points.iter().map(|p| p.date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series = inputs
            .iter()
            .map(|input| {
                let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
                for point in input.points {
                    by_day.entry(point.date).or_insert(point.value);
                }
                NamedSeries {
                    name: input.name.to_owned(),
                    unit: input.unit.map(str::to_owned),
                    values: dates.iter().map(|d| by_day.get(d).copied()).collect(),
                }
            })
            .collect();

        Self { dates, series }
    }
}

/// Chart type understood by the renderer
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// Line chart
    Line,
}

/// Side of the plot a y-axis is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPosition {
    /// Left side
    Left,
    /// Right side
    Right,
}

/// Shared x-axis of date labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XAxis {
    /// Formatted date labels
    pub labels: Vec<String>,
}

/// Independent y-axis for one series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YAxis {
    /// Axis identifier referenced by [`ChartSeries::y_axis_id`]
    pub id: String,
    /// Axis title
    pub title: String,
    /// Side of the plot
    pub position: AxisPosition,
    /// Only the first axis draws grid lines
    pub draw_grid: bool,
}

/// One drawn series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Legend label
    pub label: String,
    /// Line color
    pub color: String,
    /// Y-axis this series is plotted against
    pub y_axis_id: String,
    /// Values aligned to the x-axis labels; `null` gaps are not connected
    pub data: Vec<Option<f64>>,
}

/// Renderer-neutral specification of a multi-axis line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart type
    pub chart_type: ChartType,
    /// Chart title
    pub title: String,
    /// Shared x-axis
    pub x_axis: XAxis,
    /// One y-axis per drawn series
    pub y_axes: Vec<YAxis>,
    /// Drawn series
    pub series: Vec<ChartSeries>,
    /// Series left out for having too few points
    pub omitted_series: Vec<InsufficientData>,
}

impl ChartSpec {
    /// Serialize for the rendering service
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Builds [`ChartSpec`] values from aligned series
pub struct ChartSpecBuilder {
    palette: Vec<String>,
    min_points: usize,
}

impl Default for ChartSpecBuilder {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

impl ChartSpecBuilder {
    /// Create a builder from analytics configuration
    ///
    /// The point threshold never drops below [`MIN_CHART_POINTS`].
    #[must_use]
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let palette = if config.chart_palette.is_empty() {
            CHART_PALETTE.iter().map(|&c| c.to_owned()).collect()
        } else {
            config.chart_palette.clone()
        };
        Self {
            palette,
            min_points: config.min_chart_points.max(MIN_CHART_POINTS),
        }
    }

    /// Align `inputs` and build a chart from them
    #[must_use]
    pub fn line_chart(
        &self,
        title: &str,
        inputs: &[SeriesInput<'_>],
    ) -> AnalysisOutcome<ChartSpec> {
        self.build(title, &AlignedSeries::align(inputs))
    }

    /// Build a chart from already aligned series
    #[must_use]
    pub fn build(&self, title: &str, aligned: &AlignedSeries) -> AnalysisOutcome<ChartSpec> {
        let mut y_axes = Vec::new();
        let mut series = Vec::new();
        let mut omitted_series = Vec::new();

        for named in &aligned.series {
            let points = named.point_count();
            if points < self.min_points {
                omitted_series.push(InsufficientData::TooFewPoints {
                    series: named.name.clone(),
                    points,
                    required: self.min_points,
                });
                continue;
            }
            let slot = series.len();
            let axis_id = format!("y{slot}");
            y_axes.push(YAxis {
                id: axis_id.clone(),
                title: named
                    .unit
                    .as_ref()
                    .map_or_else(
                        || named.name.clone(),
                        |unit| format!("{} ({unit})", named.name),
                    ),
                position: if slot % 2 == 0 {
                    AxisPosition::Left
                } else {
                    AxisPosition::Right
                },
                draw_grid: slot == 0,
            });
            series.push(ChartSeries {
                label: named.name.clone(),
                color: self.color(slot),
                y_axis_id: axis_id,
                data: named.values.clone(),
            });
        }

        if series.is_empty() {
            return AnalysisOutcome::InsufficientData(InsufficientData::EmptyChart {
                title: title.to_owned(),
            });
        }

        AnalysisOutcome::Computed(ChartSpec {
            chart_type: ChartType::Line,
            title: title.to_owned(),
            x_axis: XAxis {
                labels: aligned
                    .dates
                    .iter()
                    .map(|d| d.format(LABEL_FORMAT).to_string())
                    .collect(),
            },
            y_axes,
            series,
            omitted_series,
        })
    }

    fn color(&self, slot: usize) -> String {
        self.palette
            .get(slot % self.palette.len().max(1))
            .cloned()
            .unwrap_or_else(|| FALLBACK_COLOR.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    fn points(values: &[(u32, f64)]) -> Vec<TimeSeriesPoint> {
        values
            .iter()
            .map(|&(d, v)| TimeSeriesPoint::new(day(d), v))
            .collect()
    }

    fn input<'a>(
        name: &'a str,
        unit: Option<&'a str>,
        points: &'a [TimeSeriesPoint],
    ) -> SeriesInput<'a> {
        SeriesInput { name, unit, points }
    }

    #[test]
    fn test_align_unions_dates_and_leaves_gaps() {
        let weight = points(&[(1, 90.0), (5, 88.0)]);
        let fat = points(&[(3, 21.0), (5, 20.5)]);

        let aligned = AlignedSeries::align(&[
            input("weight", Some("kg"), &weight),
            input("body_fat", Some("%"), &fat),
        ]);

        assert_eq!(aligned.dates, vec![day(1), day(3), day(5)]);
        assert_eq!(aligned.series[0].values, vec![Some(90.0), None, Some(88.0)]);
        assert_eq!(aligned.series[1].values, vec![None, Some(21.0), Some(20.5)]);
    }

    #[test]
    fn test_each_series_gets_its_own_axis_and_color() {
        let weight = points(&[(1, 90.0), (5, 88.0)]);
        let fat = points(&[(1, 21.0), (5, 20.5)]);
        let builder = ChartSpecBuilder::default();

        let chart = builder
            .line_chart(
                "Body composition",
                &[
                    input("weight", Some("kg"), &weight),
                    input("body_fat", Some("%"), &fat),
                ],
            )
            .computed()
            .unwrap();

        assert_eq!(chart.x_axis.labels, vec!["2025-07-01", "2025-07-05"]);
        assert_eq!(chart.y_axes.len(), 2);
        assert_eq!(chart.y_axes[0].position, AxisPosition::Left);
        assert_eq!(chart.y_axes[1].position, AxisPosition::Right);
        assert_eq!(chart.y_axes[0].title, "weight (kg)");
        assert_eq!(chart.series[1].y_axis_id, "y1");
        assert_ne!(chart.series[0].color, chart.series[1].color);
    }

    #[test]
    fn test_single_point_series_omitted_from_chart() {
        let weight = points(&[(1, 90.0), (5, 88.0)]);
        let waist = points(&[(3, 84.0)]);

        let chart = ChartSpecBuilder::default()
            .line_chart(
                "Progress",
                &[
                    input("weight", None, &weight),
                    input("waist", None, &waist),
                ],
            )
            .computed()
            .unwrap();

        assert_eq!(chart.series.len(), 1);
        assert_eq!(
            chart.omitted_series,
            vec![InsufficientData::TooFewPoints {
                series: "waist".to_owned(),
                points: 1,
                required: 2,
            }]
        );
        // The shared axis still spans the omitted series' dates
        assert_eq!(chart.x_axis.labels.len(), 3);
    }

    #[test]
    fn test_chart_without_drawable_series_is_insufficient() {
        let single = points(&[(2, 70.0)]);
        let outcome =
            ChartSpecBuilder::default().line_chart("Progress", &[input("weight", None, &single)]);

        assert_eq!(
            outcome.insufficient_reason(),
            Some(&InsufficientData::EmptyChart {
                title: "Progress".to_owned()
            })
        );
    }

    #[test]
    fn test_configured_threshold_cannot_chart_single_points() {
        let single = points(&[(2, 70.0)]);
        let config = AnalyticsConfig {
            min_chart_points: 1,
            ..AnalyticsConfig::default()
        };

        let outcome = ChartSpecBuilder::from_config(&config)
            .line_chart("Progress", &[input("weight", Some("kg"), &single)]);

        assert!(!outcome.is_computed());
    }

    #[test]
    fn test_configured_threshold_above_minimum_is_respected() {
        let weight = points(&[(1, 90.0), (5, 88.0)]);
        let config = AnalyticsConfig {
            min_chart_points: 3,
            ..AnalyticsConfig::default()
        };

        let outcome = ChartSpecBuilder::from_config(&config)
            .line_chart("Progress", &[input("weight", None, &weight)]);

        assert!(!outcome.is_computed());
    }

    #[test]
    fn test_spec_serializes_gaps_as_null() {
        let weight = points(&[(1, 90.0), (5, 88.0)]);
        let fat = points(&[(3, 21.0), (5, 20.5)]);
        let chart = ChartSpecBuilder::default()
            .line_chart(
                "Progress",
                &[
                    input("weight", None, &weight),
                    input("body_fat", None, &fat),
                ],
            )
            .computed()
            .unwrap();

        let json = chart.to_json().unwrap();

        assert_eq!(json["chart_type"], "line");
        assert!(json["series"][0]["data"][1].is_null());
        assert!(json["omitted_series"].as_array().unwrap().is_empty());
    }
}
