// ABOUTME: Recoverable analysis conditions isolated per metric or lookback window
// ABOUTME: Covers insufficient data, undefined variance, and missing metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use serde_json::json;
use thiserror::Error;

/// Conditions that abort a single statistic but never a whole batch.
///
/// Batch entry points log these and skip the affected metric or window so
/// reports for unaffected metrics stay complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Series or window is too short for the requested statistic
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum number of observations required
        required: usize,
        /// Number of observations supplied
        actual: usize,
    },
    /// Standard deviation is zero or undefined
    #[error("undefined variance for metric '{metric}'")]
    UndefinedVariance {
        /// Metric whose variance collapsed
        metric: String,
    },
    /// Metric absent from history or current values
    #[error("metric '{metric}' is missing")]
    MissingMetric {
        /// Name of the missing metric
        metric: String,
    },
}

impl AnalysisError {
    /// Create an insufficient data error
    #[must_use]
    pub const fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Create a missing metric error
    #[must_use]
    pub fn missing_metric(metric: impl Into<String>) -> Self {
        Self::MissingMetric {
            metric: metric.into(),
        }
    }

    /// Error code for this condition
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InsufficientData { .. } => ErrorCode::InsufficientData,
            Self::UndefinedVariance { .. } => ErrorCode::UndefinedVariance,
            Self::MissingMetric { .. } => ErrorCode::MissingMetric,
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(error: AnalysisError) -> Self {
        let details = match &error {
            AnalysisError::InsufficientData { required, actual } => {
                json!({ "required": required, "actual": actual })
            }
            AnalysisError::UndefinedVariance { metric } | AnalysisError::MissingMetric { metric } => {
                json!({ "metric": metric })
            }
        };
        Self::new(error.code(), error.to_string()).with_details(details)
    }
}
