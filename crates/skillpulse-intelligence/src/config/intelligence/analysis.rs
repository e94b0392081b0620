// ABOUTME: Outlier, improvement and trend analysis configuration
// ABOUTME: IQR fences, recent window size, polarity policies, and trend strength buckets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{improvement, outliers, trend};
use crate::models::{MetricPolicy, MetricPolicyTable};
use serde::{Deserialize, Serialize};

/// Outlier detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// Multiplier `k` applied to the IQR for the Tukey fences
    pub iqr_multiplier: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: outliers::DEFAULT_IQR_MULTIPLIER,
        }
    }
}

/// Improvement classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementConfig {
    /// Number of trailing raw observations averaged into `recent_mean`
    pub recent_window_size: usize,
    /// |z| beyond which a regression is ranked high priority
    pub high_priority_z: f64,
    /// Per-metric polarity and threshold table, including the fallback policy
    pub metric_policies: MetricPolicyTable,
}

impl ImprovementConfig {
    /// Policy applied to metrics missing from the table
    #[must_use]
    pub const fn fallback_policy(&self) -> MetricPolicy {
        self.metric_policies.fallback()
    }
}

impl Default for ImprovementConfig {
    fn default() -> Self {
        Self {
            recent_window_size: improvement::DEFAULT_RECENT_WINDOW_SIZE,
            high_priority_z: improvement::DEFAULT_HIGH_PRIORITY_Z,
            metric_policies: MetricPolicyTable::default(),
        }
    }
}

/// Trend regression configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// |r| above which a trend is moderate
    pub moderate_strength: f64,
    /// |r| above which a trend is strong
    pub strong_strength: f64,
    /// p-value below which the slope is significant
    pub significance_alpha: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            moderate_strength: trend::MODERATE_STRENGTH,
            strong_strength: trend::STRONG_STRENGTH,
            significance_alpha: trend::SIGNIFICANCE_ALPHA,
        }
    }
}
