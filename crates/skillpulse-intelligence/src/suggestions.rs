// ABOUTME: Structured improvement suggestions derived from progress reports
// ABOUTME: Typed focus areas and training adjustments with player practice preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::{IntelligenceConfig, LookbackWindows, SummaryConfig};
use crate::improvement_classifier::Priority;
use crate::progress_summary::ProgressSummarizer;
use crate::progress_tracker::ProgressReport;
use crate::trend_analyzer::TrendDirection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player practice preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPreferences {
    /// Preferred time for practice sessions (e.g. "evenings")
    pub preferred_practice_time: Option<String>,
}

/// Aspect of performance to focus on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusArea {
    /// Consistency in the window fell below the floor
    ImproveConsistency {
        /// Lookback window name
        window: String,
    },
    /// The window's trend improves, but weakly
    StrengthenTrend {
        /// Lookback window name
        window: String,
    },
}

/// Concrete change to the training routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrainingAdjustment {
    /// Practice more often to raise consistency
    IncreasePracticeFrequency {
        /// Lookback window name
        window: String,
    },
    /// Reduce session-to-session volatility
    StabilizePerformance {
        /// Lookback window name
        window: String,
    },
    /// Book focused sessions at the player's preferred time
    ScheduleFocusedPractice {
        /// Preferred practice time
        preferred_time: String,
    },
}

/// Suggestion for one regressing metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSuggestion {
    /// Metric name
    pub metric: String,
    /// Urgency
    pub priority: Priority,
    /// Areas to focus on
    pub focus_areas: Vec<FocusArea>,
    /// Adjustments to the training routine
    pub training_adjustments: Vec<TrainingAdjustment>,
}

/// Builds suggestions for metrics that are slipping in the short term
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    summarizer: ProgressSummarizer,
    windows: LookbackWindows,
    config: SummaryConfig,
}

impl SuggestionEngine {
    /// Create an engine from configuration
    #[must_use]
    pub fn new(config: &IntelligenceConfig) -> Self {
        Self {
            summarizer: ProgressSummarizer::new(config),
            windows: config.tracking.lookback_windows.clone(),
            config: config.summary.clone(),
        }
    }

    /// Suggestions for metrics whose short-term change is negative or whose
    /// short-term trend is declining, high priority first
    #[must_use]
    pub fn suggest(
        &self,
        reports: &BTreeMap<String, ProgressReport>,
        preferences: &PlayerPreferences,
    ) -> Vec<ProgressSuggestion> {
        let mut suggestions: Vec<ProgressSuggestion> = reports
            .values()
            .filter_map(|report| {
                let change = self.summarizer.improvement_change(report);
                let declining = self
                    .summarizer
                    .short_term_trend(report)
                    .is_some_and(|trend| trend.direction == TrendDirection::Declining);
                if change >= 0.0 && !declining {
                    return None;
                }

                Some(ProgressSuggestion {
                    metric: report.metric.clone(),
                    priority: if change < -self.config.change_threshold_percent {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                    focus_areas: self.focus_areas(report),
                    training_adjustments: self.training_adjustments(report, preferences),
                })
            })
            .collect();

        suggestions.sort_by_key(|s| s.priority);
        suggestions
    }

    fn focus_areas(&self, report: &ProgressReport) -> Vec<FocusArea> {
        let mut areas = Vec::new();
        for window in self.windows.iter() {
            if report
                .improvement_rate
                .get(&window.name)
                .is_some_and(|rate| rate.consistency_score < self.config.consistency_floor)
            {
                areas.push(FocusArea::ImproveConsistency {
                    window: window.name.clone(),
                });
            }
        }
        for window in self.windows.iter() {
            if report.trend_analysis.get(&window.name).is_some_and(|trend| {
                trend.direction == TrendDirection::Improving
                    && trend.strength_score < self.config.weak_trend_strength
            }) {
                areas.push(FocusArea::StrengthenTrend {
                    window: window.name.clone(),
                });
            }
        }
        areas
    }

    fn training_adjustments(
        &self,
        report: &ProgressReport,
        preferences: &PlayerPreferences,
    ) -> Vec<TrainingAdjustment> {
        let mut adjustments = Vec::new();
        for window in self.windows.iter() {
            if report
                .improvement_rate
                .get(&window.name)
                .is_some_and(|rate| rate.consistency_score < self.config.consistency_floor)
            {
                adjustments.push(TrainingAdjustment::IncreasePracticeFrequency {
                    window: window.name.clone(),
                });
            }
        }
        for window in self.windows.iter() {
            if report
                .trend_analysis
                .get(&window.name)
                .and_then(|trend| trend.volatility)
                .is_some_and(|volatility| volatility > self.config.volatility_ceiling)
            {
                adjustments.push(TrainingAdjustment::StabilizePerformance {
                    window: window.name.clone(),
                });
            }
        }
        if let Some(preferred_time) = preferences
            .preferred_practice_time
            .as_deref()
            .filter(|time| !time.trim().is_empty())
        {
            adjustments.push(TrainingAdjustment::ScheduleFocusedPractice {
                preferred_time: preferred_time.to_owned(),
            });
        }
        adjustments
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(&IntelligenceConfig::default())
    }
}
