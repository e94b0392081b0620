// ABOUTME: Player performance intelligence engine for SkillPulse
// ABOUTME: Outlier detection, trend regression, improvement classification, and progress tracking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # SkillPulse Intelligence
//!
//! Stateless analytics over timestamped player metrics. Every component is
//! built once from a validated [`IntelligenceConfig`] and an
//! [`AnalysisObserver`], and is safe to share across threads.
//!
//! ## Modules
//!
//! - **statistical_analysis**: Descriptive statistics and OLS regression with exact p-values
//! - **outlier_detection**: IQR fences
//! - **trend_analyzer**: Polarity-aware trend direction, strength, and significance
//! - **improvement_classifier**: Recent vs historical baseline, suggested targets, ranking
//! - **progress_tracker**: Lookback-window comparison, rates, and milestones
//! - **progress_summary**: Cross-metric digest and overall score
//! - **suggestions**: Typed focus areas and training adjustments

pub use skillpulse_core::{constants, errors, models};

/// Intelligence configuration with environment overrides
pub mod config;

/// Injectable observability interface
pub mod observer;

/// Descriptive statistics and regression
pub mod statistical_analysis;

/// IQR outlier detection
pub mod outlier_detection;

/// Trend regression over sub-series
pub mod trend_analyzer;

/// Improvement classification and recommendations
pub mod improvement_classifier;

/// Direction-aware milestone planning
pub mod milestones;

/// Progress tracking across lookback windows
pub mod progress_tracker;

/// Cross-metric progress summary
pub mod progress_summary;

/// Structured improvement suggestions
pub mod suggestions;

pub use config::intelligence::{ConfigError, IntelligenceConfig, LookbackWindow, LookbackWindows};
pub use improvement_classifier::{
    CleanStats, CurrentStats, ImprovementAnalysis, ImprovementClassifier,
    ImprovementRecommendation, MetricClassification, Priority,
};
pub use milestones::{Milestone, MilestoneProgress};
pub use observer::{AnalysisObserver, NoopObserver, TracingObserver};
pub use outlier_detection::{OutlierDetector, OutlierReport, OutlierStats};
pub use progress_summary::{
    AchievedMilestone, MetricChange, NextTarget, ProgressSummarizer, ProgressSummary,
};
pub use progress_tracker::{HistoricalComparison, ImprovementRate, ProgressReport, ProgressTracker};
pub use statistical_analysis::{RegressionResult, StatisticalAnalyzer};
pub use suggestions::{
    FocusArea, PlayerPreferences, ProgressSuggestion, SuggestionEngine, TrainingAdjustment,
};
pub use trend_analyzer::{TrendAnalyzer, TrendDirection, TrendInfo, TrendStrength};
