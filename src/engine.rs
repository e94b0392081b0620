// ABOUTME: Performance engine facade combining classification, tracking, summary, and suggestions
// ABOUTME: Owns a validated configuration and observer and produces one serializable player analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    AnalysisObserver, ImprovementClassifier, ImprovementRecommendation, IntelligenceConfig,
    MetricClassification, PlayerPreferences, ProgressReport, ProgressSuggestion,
    ProgressSummarizer, ProgressSummary, ProgressTracker, SuggestionEngine, TracingObserver,
};
use crate::models::{MetricSeries, PerformanceHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Everything known about one player at analysis time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Historical observations per metric
    pub history: PerformanceHistory,
    /// Latest value per metric
    pub current_values: BTreeMap<String, f64>,
    /// Optional target per metric
    #[serde(default)]
    pub targets: BTreeMap<String, f64>,
    /// Practice preferences
    #[serde(default)]
    pub preferences: PlayerPreferences,
}

/// Combined analysis of one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnalysis {
    /// Reference time the lookback windows were anchored at
    pub reference_time: DateTime<Utc>,
    /// Per-metric classification
    pub performance: BTreeMap<String, MetricClassification>,
    /// Metrics that need improvement, high priority first
    pub recommendations: Vec<ImprovementRecommendation>,
    /// Per-metric progress
    pub progress: BTreeMap<String, ProgressReport>,
    /// Cross-metric digest
    pub summary: ProgressSummary,
    /// Suggestions for slipping metrics
    pub suggestions: Vec<ProgressSuggestion>,
}

/// Facade over every analysis component
pub struct PerformanceEngine {
    config: IntelligenceConfig,
    classifier: ImprovementClassifier,
    tracker: ProgressTracker,
    summarizer: ProgressSummarizer,
    suggestions: SuggestionEngine,
}

impl PerformanceEngine {
    /// Create an engine that reports through `tracing`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: IntelligenceConfig) -> AppResult<Self> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create an engine with a custom observer
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn with_observer(
        config: IntelligenceConfig,
        observer: Arc<dyn AnalysisObserver>,
    ) -> AppResult<Self> {
        config.validate()?;

        info!(
            iqr_multiplier = %config.outliers.iqr_multiplier,
            recent_window_size = %config.improvement.recent_window_size,
            lookback_windows = %config.tracking.lookback_windows,
            num_milestones = %config.tracking.num_milestones,
            event_type = "engine_initialized",
            "Performance engine initialized"
        );

        Ok(Self {
            classifier: ImprovementClassifier::new(&config, Arc::clone(&observer)),
            tracker: ProgressTracker::new(&config, observer),
            summarizer: ProgressSummarizer::new(&config),
            suggestions: SuggestionEngine::new(&config),
            config,
        })
    }

    /// Create an engine from defaults plus `SKILLPULSE_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override is malformed or invalid
    pub fn from_env() -> AppResult<Self> {
        Self::new(IntelligenceConfig::load()?)
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &IntelligenceConfig {
        &self.config
    }

    /// Classify a single series
    ///
    /// # Errors
    ///
    /// Returns an error if the series is empty
    pub fn classify(&self, series: &MetricSeries) -> AppResult<MetricClassification> {
        self.classifier.classify(series).map_err(AppError::from)
    }

    /// Classify every metric in `history`
    #[must_use]
    pub fn analyze_performance(
        &self,
        history: &PerformanceHistory,
    ) -> BTreeMap<String, MetricClassification> {
        self.classifier.classify_all(history)
    }

    /// Rank metrics that need improvement
    #[must_use]
    pub fn rank_improvement_needs(
        &self,
        classifications: &BTreeMap<String, MetricClassification>,
    ) -> Vec<ImprovementRecommendation> {
        self.classifier.rank_improvement_needs(classifications)
    }

    /// Track progress with windows anchored now
    ///
    /// # Errors
    ///
    /// Returns an error if a current or target value is not finite
    pub fn track_progress(
        &self,
        current_values: &BTreeMap<String, f64>,
        history: &PerformanceHistory,
        targets: &BTreeMap<String, f64>,
    ) -> AppResult<BTreeMap<String, ProgressReport>> {
        self.tracker.track(current_values, history, targets)
    }

    /// Track progress with windows anchored at `reference`
    ///
    /// # Errors
    ///
    /// Returns an error if a current or target value is not finite
    pub fn track_progress_at(
        &self,
        current_values: &BTreeMap<String, f64>,
        history: &PerformanceHistory,
        targets: &BTreeMap<String, f64>,
        reference: DateTime<Utc>,
    ) -> AppResult<BTreeMap<String, ProgressReport>> {
        self.tracker
            .track_at(current_values, history, targets, reference)
    }

    /// Summarize progress reports
    #[must_use]
    pub fn summarize(&self, reports: &BTreeMap<String, ProgressReport>) -> ProgressSummary {
        self.summarizer.summarize(reports)
    }

    /// Suggestions for metrics slipping in the short term
    #[must_use]
    pub fn suggest_improvements(
        &self,
        reports: &BTreeMap<String, ProgressReport>,
        preferences: &PlayerPreferences,
    ) -> Vec<ProgressSuggestion> {
        self.suggestions.suggest(reports, preferences)
    }

    /// Full analysis with windows anchored now
    ///
    /// # Errors
    ///
    /// Returns an error if a current or target value is not finite
    pub fn analyze_player(&self, snapshot: &PlayerSnapshot) -> AppResult<PlayerAnalysis> {
        self.analyze_player_at(snapshot, Utc::now())
    }

    /// Full analysis with windows anchored at `reference`
    ///
    /// # Errors
    ///
    /// Returns an error if a current or target value is not finite
    pub fn analyze_player_at(
        &self,
        snapshot: &PlayerSnapshot,
        reference: DateTime<Utc>,
    ) -> AppResult<PlayerAnalysis> {
        let progress = self.track_progress_at(
            &snapshot.current_values,
            &snapshot.history,
            &snapshot.targets,
            reference,
        )?;
        let performance = self.analyze_performance(&snapshot.history);

        Ok(PlayerAnalysis {
            reference_time: reference,
            recommendations: self.rank_improvement_needs(&performance),
            summary: self.summarize(&progress),
            suggestions: self.suggest_improvements(&progress, &snapshot.preferences),
            performance,
            progress,
        })
    }
}
