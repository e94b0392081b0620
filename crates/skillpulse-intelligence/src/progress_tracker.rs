// ABOUTME: Progress tracking across named lookback windows
// ABOUTME: Historical comparison, per-window trends, improvement rates, and milestone progress per metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress tracking
//!
//! Each metric present in both the current values and the history gets a
//! [`ProgressReport`]. Window computations that lack data are skipped and
//! reported to the observer; they never fail the batch.

use crate::config::intelligence::{IntelligenceConfig, LookbackWindow, TrackingConfig};
use crate::constants::tracking::{DAYS_PER_WEEK, MAX_CONSISTENCY};
use crate::errors::{AnalysisError, AppError, AppResult};
use crate::milestones::MilestoneProgress;
use crate::models::{MetricPolicyTable, MetricSeries, PerformanceHistory, Polarity, PolicySource};
use crate::observer::{AnalysisObserver, TracingObserver};
use crate::statistical_analysis::StatisticalAnalyzer;
use crate::trend_analyzer::{TrendAnalyzer, TrendInfo};
use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Current value compared with one window's distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalComparison {
    /// Mean of the window
    pub average: f64,
    /// Sample std of the window, `None` below two observations
    pub std: Option<f64>,
    /// Percent change of current vs window mean, `None` when the mean is 0
    pub change_percent: Option<f64>,
    /// (current - mean) / std, 0 when the std is zero or undefined
    pub z_score: f64,
    /// Percentile rank of current within the window
    pub percentile: f64,
    /// Observations in the window
    pub sample_size: usize,
}

/// Linear extrapolation from a window's first observation to the current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementRate {
    /// First observation in the window
    pub start_value: f64,
    /// Change per day over the window length
    pub daily_rate: f64,
    /// Change per week
    pub weekly_rate: f64,
    /// Current value extrapolated over the projection horizon
    pub projected_value: f64,
    /// Projection horizon in days
    pub projection_days: u32,
    /// Percent change since the window start, `None` when the start is 0
    pub total_change_percent: Option<f64>,
    /// 100 * (1 - min(CV, 1)) in `[0, 100]`
    pub consistency_score: f64,
}

/// Progress of one metric across every lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Metric name
    pub metric: String,
    /// Direction of improvement applied
    pub polarity: Polarity,
    /// Latest value
    pub current_value: f64,
    /// Supplied or default target
    pub target_value: f64,
    /// Window name to comparison
    pub historical_comparison: BTreeMap<String, HistoricalComparison>,
    /// Window name to trend, for windows with at least two observations
    pub trend_analysis: BTreeMap<String, TrendInfo>,
    /// Window name to improvement rate
    pub improvement_rate: BTreeMap<String, ImprovementRate>,
    /// Milestones towards the target
    pub milestone_progress: MilestoneProgress,
}

/// Tracks progress of current values against history
pub struct ProgressTracker {
    trend_analyzer: TrendAnalyzer,
    config: TrackingConfig,
    policies: MetricPolicyTable,
    observer: Arc<dyn AnalysisObserver>,
}

impl ProgressTracker {
    /// Create a tracker from configuration
    #[must_use]
    pub fn new(config: &IntelligenceConfig, observer: Arc<dyn AnalysisObserver>) -> Self {
        Self {
            trend_analyzer: TrendAnalyzer::new(config.trend.clone()),
            config: config.tracking.clone(),
            policies: config.improvement.metric_policies.clone(),
            observer,
        }
    }

    /// Track progress with windows anchored at the current UTC time
    ///
    /// # Errors
    ///
    /// Returns an error if a current or target value is not finite
    pub fn track(
        &self,
        current_values: &BTreeMap<String, f64>,
        history: &PerformanceHistory,
        targets: &BTreeMap<String, f64>,
    ) -> AppResult<BTreeMap<String, ProgressReport>> {
        self.track_at(current_values, history, targets, Utc::now())
    }

    /// Track progress with windows anchored at `reference`.
    ///
    /// An observation belongs to a window iff its timestamp is at or after
    /// `reference - days`. Windows longer than chrono's date range include
    /// every observation.
    ///
    /// # Errors
    ///
    /// Returns an error if a current or target value is not finite
    pub fn track_at(
        &self,
        current_values: &BTreeMap<String, f64>,
        history: &PerformanceHistory,
        targets: &BTreeMap<String, f64>,
        reference: DateTime<Utc>,
    ) -> AppResult<BTreeMap<String, ProgressReport>> {
        Self::validate_inputs("current", current_values)?;
        Self::validate_inputs("target", targets)?;

        let started = Instant::now();
        let mut work = Vec::with_capacity(current_values.len());
        for (metric, current) in current_values {
            match history.get(metric) {
                Some(series) => work.push((series, *current, targets.get(metric).copied())),
                None => self
                    .observer
                    .metric_skipped(metric, &AnalysisError::missing_metric(metric.as_str())),
            }
        }

        let reports: BTreeMap<String, ProgressReport> = work
            .par_iter()
            .map(|(series, current, target)| {
                let report = self.report(series, *current, *target, reference);
                (report.metric.clone(), report)
            })
            .collect();

        self.observer.batch_completed(
            "track_progress",
            reports.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(reports)
    }

    fn validate_inputs(kind: &str, values: &BTreeMap<String, f64>) -> AppResult<()> {
        if let Some((metric, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(AppError::invalid_input(format!(
                "{kind} value for metric '{metric}' must be finite, got {value}"
            ))
            .with_details(json!({ "metric": metric, "kind": kind })));
        }
        Ok(())
    }

    fn report(
        &self,
        series: &MetricSeries,
        current: f64,
        target: Option<f64>,
        reference: DateTime<Utc>,
    ) -> ProgressReport {
        let metric = series.metric();
        let (policy, source) = self.policies.resolve(metric);
        if source == PolicySource::Fallback {
            self.observer.fallback_policy_applied(metric, &policy);
        }
        let polarity = policy.polarity;

        let mut historical_comparison = BTreeMap::new();
        let mut trend_analysis = BTreeMap::new();
        let mut improvement_rate = BTreeMap::new();

        for window in self.config.lookback_windows.iter() {
            // A window reaching past the representable time range covers all history
            let values = reference
                .checked_sub_signed(Duration::days(i64::from(window.days)))
                .map_or_else(|| series.values(), |cutoff| series.values_since(cutoff));
            if values.is_empty() {
                self.observer.window_skipped(
                    metric,
                    &window.name,
                    &AnalysisError::insufficient_data(1, 0),
                );
                continue;
            }

            historical_comparison.insert(
                window.name.clone(),
                Self::compare(metric, current, &values, self.observer.as_ref()),
            );

            match self.trend_analyzer.analyze_with_polarity(&values, polarity) {
                Ok(trend) => {
                    trend_analysis.insert(window.name.clone(), trend);
                }
                Err(reason) => self.observer.window_skipped(metric, &window.name, &reason),
            }

            improvement_rate.insert(
                window.name.clone(),
                self.improvement_rate(current, &values, window),
            );
        }

        let target_value = target.unwrap_or_else(|| self.default_target(current, polarity));

        ProgressReport {
            metric: metric.to_owned(),
            polarity,
            current_value: current,
            target_value,
            historical_comparison,
            trend_analysis,
            improvement_rate,
            milestone_progress: MilestoneProgress::plan(
                current,
                target_value,
                self.config.num_milestones,
                polarity,
            ),
        }
    }

    fn compare(
        metric: &str,
        current: f64,
        values: &[f64],
        observer: &dyn AnalysisObserver,
    ) -> HistoricalComparison {
        let average = StatisticalAnalyzer::mean(values).unwrap_or(current);
        let std = StatisticalAnalyzer::sample_std(values);
        let z_score = match std {
            Some(std) if std > 0.0 => (current - average) / std,
            _ => {
                observer.undefined_variance(metric, "window comparison");
                0.0
            }
        };

        HistoricalComparison {
            average,
            std,
            change_percent: (average != 0.0).then(|| (current - average) / average * 100.0),
            z_score,
            percentile: StatisticalAnalyzer::percentile_of_score(values, current).unwrap_or(0.0),
            sample_size: values.len(),
        }
    }

    fn improvement_rate(&self, current: f64, values: &[f64], window: &LookbackWindow) -> ImprovementRate {
        let start_value = values.first().copied().unwrap_or(current);
        let daily_rate = (current - start_value) / f64::from(window.days);

        ImprovementRate {
            start_value,
            daily_rate,
            weekly_rate: daily_rate * DAYS_PER_WEEK,
            projected_value: daily_rate.mul_add(f64::from(self.config.projection_days), current),
            projection_days: self.config.projection_days,
            total_change_percent: (start_value != 0.0)
                .then(|| (current - start_value) / start_value * 100.0),
            consistency_score: Self::consistency(values),
        }
    }

    /// 100 * (1 - min(CV, 1)), clamped to `[0, 100]`.
    ///
    /// Single-point windows and constant windows are fully consistent; a
    /// varying window centred on zero has an unbounded CV and scores 0.
    fn consistency(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return MAX_CONSISTENCY;
        }
        let cv = StatisticalAnalyzer::coefficient_of_variation(values).unwrap_or_else(|| {
            if StatisticalAnalyzer::sample_std(values).is_some_and(|std| std > 0.0) {
                1.0
            } else {
                0.0
            }
        });
        (MAX_CONSISTENCY * (1.0 - cv.min(1.0))).clamp(0.0, MAX_CONSISTENCY)
    }

    fn default_target(&self, current: f64, polarity: Polarity) -> f64 {
        (polarity.sign() * current.abs()).mul_add(self.config.default_target_uplift, current)
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new(&IntelligenceConfig::default(), Arc::new(TracingObserver))
    }
}
