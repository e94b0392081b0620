// ABOUTME: Trend analysis over metric sub-series using OLS regression
// ABOUTME: Polarity-aware direction, bucketed strength, significance, and volatility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::intelligence::TrendConfig;
use crate::errors::AnalysisError;
use crate::models::Polarity;
use crate::statistical_analysis::StatisticalAnalyzer;
use serde::{Deserialize, Serialize};

/// Direction of a trend relative to the metric's polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Moving in the improving direction
    Improving,
    /// Not moving in the improving direction
    Declining,
}

/// |r| bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    /// |r| at or below the moderate threshold
    Weak,
    /// |r| above moderate, at or below strong
    Moderate,
    /// |r| above the strong threshold
    Strong,
}

/// Regression-based description of a sub-series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendInfo {
    /// Improving or declining, per polarity
    pub direction: TrendDirection,
    /// Change per observation
    pub slope: f64,
    /// Regression intercept
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Pearson correlation
    pub correlation: f64,
    /// Bucketed |r|
    pub strength: TrendStrength,
    /// |r| in `[0, 1]`
    pub strength_score: f64,
    /// Whether the slope p-value is below alpha
    pub significance: bool,
    /// Two-sided slope p-value, `None` when undefined
    pub p_value: Option<f64>,
    /// std / |mean|, `None` when undefined
    pub volatility: Option<f64>,
    /// Number of observations
    pub sample_size: usize,
}

impl TrendInfo {
    /// Strength signed by direction: positive improving, negative declining
    #[must_use]
    pub fn signed_strength(&self) -> f64 {
        match self.direction {
            TrendDirection::Improving => self.strength_score,
            TrendDirection::Declining => -self.strength_score,
        }
    }
}

/// Computes [`TrendInfo`] for numeric sub-series
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer with the given thresholds
    #[must_use]
    pub const fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Analyze a higher-is-better series
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than two values
    pub fn analyze(&self, values: &[f64]) -> Result<TrendInfo, AnalysisError> {
        self.analyze_with_polarity(values, Polarity::HigherBetter)
    }

    /// Analyze a series whose improving direction is given by `polarity`.
    ///
    /// A flat series has no improving slope and reports as declining.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than two values
    pub fn analyze_with_polarity(
        &self,
        values: &[f64],
        polarity: Polarity,
    ) -> Result<TrendInfo, AnalysisError> {
        let regression = StatisticalAnalyzer::linear_regression(values)?;

        let direction = if regression.slope * polarity.sign() > 0.0 {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        };

        let strength_score = regression.correlation.abs();
        let significance = regression
            .p_value
            .is_some_and(|p| p < self.config.significance_alpha);

        Ok(TrendInfo {
            direction,
            slope: regression.slope,
            intercept: regression.intercept,
            r_squared: regression.r_squared,
            correlation: regression.correlation,
            strength: self.bucket(strength_score),
            strength_score,
            significance,
            p_value: regression.p_value,
            volatility: StatisticalAnalyzer::coefficient_of_variation(values),
            sample_size: values.len(),
        })
    }

    fn bucket(&self, strength_score: f64) -> TrendStrength {
        if strength_score > self.config.strong_strength {
            TrendStrength::Strong
        } else if strength_score > self.config.moderate_strength {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        }
    }
}
