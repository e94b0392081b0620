// ABOUTME: Progress summarization across metrics
// ABOUTME: Short-term improvements and concerns, milestone highlights, and a bounded overall score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: metric counts are small

use crate::config::intelligence::{IntelligenceConfig, SummaryConfig};
use crate::constants::summary::MAX_PROGRESS_SCORE;
use crate::milestones::Milestone;
use crate::progress_tracker::ProgressReport;
use crate::trend_analyzer::TrendInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Short-term change of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    /// Metric name
    pub metric: String,
    /// Magnitude of the change in percent, positive in the reported sense
    pub change_percent: f64,
}

/// Latest completed milestone of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievedMilestone {
    /// Metric name
    pub metric: String,
    /// The milestone reached
    pub milestone: Milestone,
}

/// Next milestone of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextTarget {
    /// Metric name
    pub metric: String,
    /// Milestone value to reach
    pub target: f64,
    /// Share of the distance to the final target this milestone represents
    pub progress: f64,
}

/// Cross-metric digest of progress reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// Overall progress score in `[0, 100]`
    pub overall_progress: f64,
    /// Metrics whose short-term change beat the threshold in the improving direction
    pub key_improvements: Vec<MetricChange>,
    /// Metrics whose short-term change beat the threshold in the regressing direction
    pub areas_of_concern: Vec<MetricChange>,
    /// Latest completed milestone per metric
    pub recent_milestones: Vec<AchievedMilestone>,
    /// Next milestone per metric
    pub next_targets: Vec<NextTarget>,
}

/// Summarizes progress reports
#[derive(Debug, Clone)]
pub struct ProgressSummarizer {
    config: SummaryConfig,
    short_term_window: Option<String>,
}

impl ProgressSummarizer {
    /// Create a summarizer; the shortest configured window is the short-term view
    #[must_use]
    pub fn new(config: &IntelligenceConfig) -> Self {
        Self {
            config: config.summary.clone(),
            short_term_window: config
                .tracking
                .lookback_windows
                .shortest()
                .map(|window| window.name.clone()),
        }
    }

    /// Name of the window treated as short-term
    #[must_use]
    pub fn short_term_window(&self) -> Option<&str> {
        self.short_term_window.as_deref()
    }

    /// Short-term change oriented so that positive means improvement.
    ///
    /// An undefined change (zero baseline or missing window) counts as 0.
    #[must_use]
    pub fn improvement_change(&self, report: &ProgressReport) -> f64 {
        self.short_term_window
            .as_deref()
            .and_then(|window| report.historical_comparison.get(window))
            .and_then(|comparison| comparison.change_percent)
            .map_or(0.0, |change| change * report.polarity.sign())
    }

    /// Short-term trend, if the window had enough observations
    #[must_use]
    pub fn short_term_trend<'a>(&self, report: &'a ProgressReport) -> Option<&'a TrendInfo> {
        self.short_term_window
            .as_deref()
            .and_then(|window| report.trend_analysis.get(window))
    }

    /// Build the summary
    #[must_use]
    pub fn summarize(&self, reports: &BTreeMap<String, ProgressReport>) -> ProgressSummary {
        let threshold = self.config.change_threshold_percent;
        let mut summary = ProgressSummary {
            overall_progress: Self::overall_progress(reports),
            key_improvements: Vec::new(),
            areas_of_concern: Vec::new(),
            recent_milestones: Vec::new(),
            next_targets: Vec::new(),
        };

        for (metric, report) in reports {
            let change = self.improvement_change(report);
            if change > threshold {
                summary.key_improvements.push(MetricChange {
                    metric: metric.clone(),
                    change_percent: change,
                });
            } else if change < -threshold {
                summary.areas_of_concern.push(MetricChange {
                    metric: metric.clone(),
                    change_percent: change.abs(),
                });
            }

            if let Some(milestone) = report.milestone_progress.latest_completed() {
                summary.recent_milestones.push(AchievedMilestone {
                    metric: metric.clone(),
                    milestone: *milestone,
                });
            }

            if let Some(next) = report.milestone_progress.next {
                summary.next_targets.push(NextTarget {
                    metric: metric.clone(),
                    target: next.value,
                    progress: next.progress_percent,
                });
            }
        }

        summary
    }

    /// Mean of `total_progress * (1 + strongest signed trend strength)`, clamped to `[0, 100]`.
    ///
    /// Metrics without any windowed trend contribute 0.
    #[must_use]
    pub fn overall_progress(reports: &BTreeMap<String, ProgressReport>) -> f64 {
        if reports.is_empty() {
            return 0.0;
        }

        let total: f64 = reports
            .values()
            .map(|report| {
                report
                    .trend_analysis
                    .values()
                    .map(TrendInfo::signed_strength)
                    .reduce(f64::max)
                    .map_or(0.0, |strength| {
                        report.milestone_progress.total_progress * (1.0 + strength)
                    })
            })
            .sum();

        (total / reports.len() as f64).clamp(0.0, MAX_PROGRESS_SCORE)
    }
}

impl Default for ProgressSummarizer {
    fn default() -> Self {
        Self::new(&IntelligenceConfig::default())
    }
}
