// ABOUTME: Improvement classification comparing recent performance against a clean historical baseline
// ABOUTME: Polarity-aware z-score thresholds, suggested targets, and prioritized improvement recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::{ImprovementConfig, IntelligenceConfig};
use crate::errors::AnalysisError;
use crate::models::{MetricSeries, PerformanceHistory, Polarity, PolicySource};
use crate::observer::{AnalysisObserver, TracingObserver};
use crate::outlier_detection::{OutlierDetector, OutlierStats};
use crate::statistical_analysis::StatisticalAnalyzer;
use crate::trend_analyzer::{TrendAnalyzer, TrendInfo};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Descriptive statistics of the raw series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStats {
    /// Mean of all observations
    pub mean: f64,
    /// Median of all observations
    pub median: f64,
    /// Sample standard deviation, `None` below two observations
    pub std: Option<f64>,
    /// Full-series trend, `None` below two observations
    pub trend: Option<TrendInfo>,
}

/// Descriptive statistics of the outlier-free series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanStats {
    /// Mean of inliers
    pub mean: f64,
    /// Median of inliers
    pub median: f64,
    /// Sample standard deviation of inliers, `None` below two inliers
    pub std: Option<f64>,
}

/// Recent performance judged against the clean historical baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementAnalysis {
    /// Recent performance crossed the policy threshold in the regressing direction
    pub needs_improvement: bool,
    /// (recent mean - historical mean) / historical std, 0 when the std is undefined
    pub z_score: f64,
    /// Mean of the trailing raw observations
    pub recent_mean: f64,
    /// Mean of the clean series
    pub historical_mean: f64,
    /// Sample std of the clean series, 0 when undefined
    pub historical_std: f64,
    /// Percent change of recent vs historical mean, `None` when the baseline is 0
    pub percent_vs_historical: Option<f64>,
    /// One std beyond the baseline in the improving direction
    pub suggested_target: f64,
    /// Direction of improvement applied
    pub polarity: Polarity,
    /// z threshold applied
    pub z_threshold: f64,
    /// Whether the policy was configured or the fallback
    pub policy_source: PolicySource,
    /// Clean series had zero or undefined variance
    pub insufficient_variance: bool,
}

/// Full classification of one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricClassification {
    /// Metric name
    pub metric: String,
    /// Raw series statistics
    pub current_stats: CurrentStats,
    /// Outlier summary
    pub outlier_stats: OutlierStats,
    /// Outlier-free series statistics
    pub clean_stats: CleanStats,
    /// Improvement decision
    pub improvement_analysis: ImprovementAnalysis,
}

/// Recommendation urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Address first
    High,
    /// Address after high-priority items
    Medium,
}

/// Structured improvement recommendation for a flagged metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementRecommendation {
    /// Metric name
    pub metric: String,
    /// Raw series mean
    pub current_level: f64,
    /// Suggested target
    pub target_level: f64,
    /// |target - current|
    pub improvement_needed: f64,
    /// Full-series trend, if defined
    pub trend: Option<TrendInfo>,
    /// Urgency
    pub priority: Priority,
}

/// Classifies whether each metric needs improvement
pub struct ImprovementClassifier {
    detector: OutlierDetector,
    trend_analyzer: TrendAnalyzer,
    config: ImprovementConfig,
    observer: Arc<dyn AnalysisObserver>,
}

impl ImprovementClassifier {
    /// Create a classifier from configuration
    #[must_use]
    pub fn new(config: &IntelligenceConfig, observer: Arc<dyn AnalysisObserver>) -> Self {
        Self {
            detector: OutlierDetector::from_config(&config.outliers),
            trend_analyzer: TrendAnalyzer::new(config.trend.clone()),
            config: config.improvement.clone(),
            observer,
        }
    }

    /// Classify a validated series
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty series
    pub fn classify(&self, series: &MetricSeries) -> Result<MetricClassification, AnalysisError> {
        self.classify_values(series.metric(), &series.values())
    }

    /// Classify raw values in time order for `metric`
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` for an empty slice
    pub fn classify_values(
        &self,
        metric: &str,
        values: &[f64],
    ) -> Result<MetricClassification, AnalysisError> {
        let (Some(raw_mean), Some(raw_median)) = (
            StatisticalAnalyzer::mean(values),
            StatisticalAnalyzer::median(values),
        ) else {
            return Err(AnalysisError::insufficient_data(1, 0));
        };

        let (policy, source) = self.config.metric_policies.resolve(metric);
        if source == PolicySource::Fallback {
            self.observer.fallback_policy_applied(metric, &policy);
        }

        let outliers = self.detector.detect(values);
        self.observer
            .outliers_detected(metric, outliers.stats.total_outliers, values.len());

        let clean = outliers.retain_inliers(values);
        // The median always lies inside the fences, so `clean` is non-empty
        let historical_mean = StatisticalAnalyzer::mean(&clean).unwrap_or(raw_mean);
        let clean_std = StatisticalAnalyzer::sample_std(&clean);

        let recent_start = values.len().saturating_sub(self.config.recent_window_size);
        let recent_mean = StatisticalAnalyzer::mean(&values[recent_start..]).unwrap_or(raw_mean);

        let (z_score, historical_std, insufficient_variance) = match clean_std {
            Some(std) if std > 0.0 => ((recent_mean - historical_mean) / std, std, false),
            _ => {
                self.observer.undefined_variance(metric, "historical baseline");
                (0.0, 0.0, true)
            }
        };

        let percent_vs_historical = (historical_mean != 0.0)
            .then(|| (recent_mean - historical_mean) / historical_mean * 100.0);

        let improvement_analysis = ImprovementAnalysis {
            needs_improvement: !insufficient_variance && policy.is_regression(z_score),
            z_score,
            recent_mean,
            historical_mean,
            historical_std,
            percent_vs_historical,
            suggested_target: policy.polarity.sign().mul_add(historical_std, historical_mean),
            polarity: policy.polarity,
            z_threshold: policy.z_threshold,
            policy_source: source,
            insufficient_variance,
        };

        Ok(MetricClassification {
            metric: metric.to_owned(),
            current_stats: CurrentStats {
                mean: raw_mean,
                median: raw_median,
                std: StatisticalAnalyzer::sample_std(values),
                trend: self
                    .trend_analyzer
                    .analyze_with_polarity(values, policy.polarity)
                    .ok(),
            },
            outlier_stats: outliers.stats,
            clean_stats: CleanStats {
                mean: historical_mean,
                median: StatisticalAnalyzer::median(&clean).unwrap_or(raw_median),
                std: clean_std,
            },
            improvement_analysis,
        })
    }

    /// Classify every metric in `history` in parallel.
    ///
    /// Metrics that cannot be classified are reported to the observer and
    /// left out of the result.
    #[must_use]
    pub fn classify_all(&self, history: &PerformanceHistory) -> BTreeMap<String, MetricClassification> {
        let started = Instant::now();
        let series: Vec<&MetricSeries> = history.iter().collect();

        let results: Vec<(String, Result<MetricClassification, AnalysisError>)> = series
            .par_iter()
            .map(|series| (series.metric().to_owned(), self.classify(series)))
            .collect();

        let mut classifications = BTreeMap::new();
        for (metric, result) in results {
            match result {
                Ok(classification) => {
                    classifications.insert(metric, classification);
                }
                Err(reason) => self.observer.metric_skipped(&metric, &reason),
            }
        }

        self.observer.batch_completed(
            "analyze_performance",
            classifications.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        classifications
    }

    /// Recommendations for every metric that needs improvement, high priority first
    #[must_use]
    pub fn rank_improvement_needs(
        &self,
        classifications: &BTreeMap<String, MetricClassification>,
    ) -> Vec<ImprovementRecommendation> {
        let mut recommendations: Vec<ImprovementRecommendation> = classifications
            .values()
            .filter(|c| c.improvement_analysis.needs_improvement)
            .map(|c| {
                let analysis = &c.improvement_analysis;
                ImprovementRecommendation {
                    metric: c.metric.clone(),
                    current_level: c.current_stats.mean,
                    target_level: analysis.suggested_target,
                    improvement_needed: (analysis.suggested_target - c.current_stats.mean).abs(),
                    trend: c.current_stats.trend.clone(),
                    priority: self.priority(analysis),
                }
            })
            .collect();

        // Stable sort keeps metric order within a priority
        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }

    fn priority(&self, analysis: &ImprovementAnalysis) -> Priority {
        let regressing_z = analysis.z_score * -analysis.polarity.sign();
        if regressing_z > self.config.high_priority_z {
            Priority::High
        } else {
            Priority::Medium
        }
    }
}

impl Default for ImprovementClassifier {
    fn default() -> Self {
        Self::new(&IntelligenceConfig::default(), Arc::new(TracingObserver))
    }
}
