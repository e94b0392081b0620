// ABOUTME: IQR-based outlier detection for metric series
// ABOUTME: Tukey fences with a configurable multiplier, returning an aligned mask and summary stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: observation counts are small

use crate::config::intelligence::OutlierConfig;
use crate::statistical_analysis::StatisticalAnalyzer;
use serde::{Deserialize, Serialize};

/// Outlier summary for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierStats {
    /// Number of flagged observations
    pub total_outliers: usize,
    /// Flagged observations as a percentage of the series (0 when empty)
    pub outlier_percentage: f64,
    /// Lower fence, `None` for an empty series
    pub lower_bound: Option<f64>,
    /// Upper fence, `None` for an empty series
    pub upper_bound: Option<f64>,
}

/// Outlier mask aligned 1:1 with the analyzed values, plus its summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    /// `true` where the value lies outside the fences
    pub mask: Vec<bool>,
    /// Summary statistics
    pub stats: OutlierStats,
}

impl OutlierReport {
    /// Values whose mask entry is `false`
    #[must_use]
    pub fn retain_inliers(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(&self.mask)
            .filter(|(_, is_outlier)| !**is_outlier)
            .map(|(value, _)| *value)
            .collect()
    }
}

/// Tukey-fence outlier detector
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierDetector {
    iqr_multiplier: f64,
}

impl OutlierDetector {
    /// Create a detector with the given IQR multiplier
    #[must_use]
    pub const fn new(iqr_multiplier: f64) -> Self {
        Self { iqr_multiplier }
    }

    /// Create a detector from configuration
    #[must_use]
    pub const fn from_config(config: &OutlierConfig) -> Self {
        Self::new(config.iqr_multiplier)
    }

    /// IQR multiplier in use
    #[must_use]
    pub const fn iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier
    }

    /// Flag values outside `[Q1 - k*IQR, Q3 + k*IQR]`
    #[must_use]
    pub fn detect(&self, values: &[f64]) -> OutlierReport {
        let Some((q1, q3)) = StatisticalAnalyzer::quartiles(values) else {
            return OutlierReport {
                mask: Vec::new(),
                stats: OutlierStats {
                    total_outliers: 0,
                    outlier_percentage: 0.0,
                    lower_bound: None,
                    upper_bound: None,
                },
            };
        };

        let iqr = q3 - q1;
        let lower = self.iqr_multiplier.mul_add(-iqr, q1);
        let upper = self.iqr_multiplier.mul_add(iqr, q3);

        let mask: Vec<bool> = values.iter().map(|v| *v < lower || *v > upper).collect();
        let total_outliers = mask.iter().filter(|flag| **flag).count();

        OutlierReport {
            stats: OutlierStats {
                total_outliers,
                outlier_percentage: total_outliers as f64 / values.len() as f64 * 100.0,
                lower_bound: Some(lower),
                upper_bound: Some(upper),
            },
            mask,
        }
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::from_config(&OutlierConfig::default())
    }
}
