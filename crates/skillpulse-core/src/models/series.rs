// ABOUTME: Time-stamped metric series and tabular performance history models
// ABOUTME: Enforces strictly increasing timestamps and finite values at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

/// A single observation of a metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// When the observation was recorded
    pub timestamp: DateTime<Utc>,
    /// Observed value
    pub value: f64,
}

impl SeriesPoint {
    /// Create a new observation
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Ordered observations of one named metric.
///
/// Timestamps strictly increase and every value is finite; both are checked
/// in [`MetricSeries::new`] so downstream statistics never see corrupt input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    metric: String,
    points: Vec<SeriesPoint>,
}

impl MetricSeries {
    /// Create a validated series
    ///
    /// # Errors
    ///
    /// Returns an error if the metric name is blank, a value is not finite,
    /// or timestamps are not strictly increasing
    pub fn new(metric: impl Into<String>, points: Vec<SeriesPoint>) -> AppResult<Self> {
        let metric = metric.into();
        if metric.trim().is_empty() {
            return Err(AppError::invalid_input("metric name must not be blank"));
        }

        for (index, point) in points.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(AppError::invalid_input(format!(
                    "metric '{metric}' has a non-finite value at index {index}"
                ))
                .with_details(json!({ "metric": metric, "index": index })));
            }
        }

        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(AppError::invalid_format(format!(
                "metric '{metric}' timestamps must strictly increase (index {})",
                index + 1
            ))
            .with_details(json!({ "metric": metric, "index": index + 1 })));
        }

        Ok(Self { metric, points })
    }

    /// Build a series from values spaced one day apart, ending at `end`
    ///
    /// # Errors
    ///
    /// Returns an error if any value is not finite
    pub fn daily(metric: impl Into<String>, end: DateTime<Utc>, values: &[f64]) -> AppResult<Self> {
        let count = i64::try_from(values.len()).unwrap_or(i64::MAX);
        let points = values
            .iter()
            .zip(0_i64..)
            .map(|(&value, offset)| SeriesPoint::new(end - Duration::days(count - 1 - offset), value))
            .collect();
        Self::new(metric, points)
    }

    /// Metric name
    #[must_use]
    pub fn metric(&self) -> &str {
        &self.metric
    }

    /// Observations in time order
    #[must_use]
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Observed values in time order
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Values observed at or after `cutoff`
    #[must_use]
    pub fn values_since(&self, cutoff: DateTime<Utc>) -> Vec<f64> {
        // Sorted timestamps let us binary search the window start
        let start = self.points.partition_point(|p| p.timestamp < cutoff);
        self.points[start..].iter().map(|p| p.value).collect()
    }

    /// The last `count` values (fewer if the series is shorter)
    #[must_use]
    pub fn tail(&self, count: usize) -> Vec<f64> {
        let start = self.points.len().saturating_sub(count);
        self.points[start..].iter().map(|p| p.value).collect()
    }
}

impl<'de> Deserialize<'de> for MetricSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawSeries {
            metric: String,
            points: Vec<SeriesPoint>,
        }

        let raw = RawSeries::deserialize(deserializer)?;
        Self::new(raw.metric, raw.points).map_err(de::Error::custom)
    }
}

/// One row of tabular history: a timestamp with any subset of metric values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// When the row was recorded
    pub timestamp: DateTime<Utc>,
    /// Metric name to observed value; absent metrics were not recorded
    pub values: BTreeMap<String, f64>,
}

/// Tabular time series keyed by metric name.
///
/// Every key equals the metric name of its series; deserialization rejects
/// payloads where they differ.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceHistory {
    series: BTreeMap<String, MetricSeries>,
}

impl PerformanceHistory {
    /// Create an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from rows sorted ascending by timestamp.
    ///
    /// Metrics missing from a row are skipped for that row, so each metric's
    /// series only contains the timestamps at which it was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if rows are unsorted or duplicated, or any value is
    /// not finite
    pub fn from_records(records: &[PerformanceRecord]) -> AppResult<Self> {
        if let Some(index) = records
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(AppError::invalid_format(format!(
                "history rows must be sorted by strictly increasing timestamp (row {})",
                index + 1
            ))
            .with_details(json!({ "row": index + 1 })));
        }

        let mut columns: BTreeMap<String, Vec<SeriesPoint>> = BTreeMap::new();
        for record in records {
            for (metric, &value) in &record.values {
                columns
                    .entry(metric.clone())
                    .or_default()
                    .push(SeriesPoint::new(record.timestamp, value));
            }
        }

        let mut history = Self::new();
        for (metric, points) in columns {
            history.insert(MetricSeries::new(metric, points)?);
        }
        Ok(history)
    }

    /// Add or replace a metric's series
    pub fn insert(&mut self, series: MetricSeries) {
        self.series.insert(series.metric().to_owned(), series);
    }

    /// Builder-style variant of [`PerformanceHistory::insert`]
    #[must_use]
    pub fn with_series(mut self, series: MetricSeries) -> Self {
        self.insert(series);
        self
    }

    /// Series for `metric`, if recorded
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<&MetricSeries> {
        self.series.get(metric)
    }

    /// Whether `metric` has a series
    #[must_use]
    pub fn contains(&self, metric: &str) -> bool {
        self.series.contains_key(metric)
    }

    /// All series ordered by metric name
    pub fn iter(&self) -> impl Iterator<Item = &MetricSeries> {
        self.series.values()
    }

    /// Metric names ordered alphabetically
    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of metrics
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no metric has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl<'de> Deserialize<'de> for PerformanceHistory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawHistory {
            series: BTreeMap<String, MetricSeries>,
        }

        let raw = RawHistory::deserialize(deserializer)?;
        let mismatch = raw
            .series
            .iter()
            .find(|(key, series)| key.as_str() != series.metric());
        if let Some((key, series)) = mismatch {
            return Err(de::Error::custom(format!(
                "history key '{key}' does not match series metric '{}'",
                series.metric()
            )));
        }
        Ok(Self { series: raw.series })
    }
}
