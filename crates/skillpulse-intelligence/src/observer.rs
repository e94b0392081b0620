// ABOUTME: Injectable observability interface for analysis events
// ABOUTME: Structured tracing observer for production and a silent observer for test harnesses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis observers
//!
//! Components never install a global subscriber. They report noteworthy
//! events to an [`AnalysisObserver`] supplied at construction, and the
//! embedding application decides where those events go.

use crate::errors::AnalysisError;
use crate::models::{MetricPolicy, Polarity};
use tracing::{debug, info, warn};

/// Receiver for analysis events.
///
/// Every method has an empty default body so implementations only override
/// the events they care about.
pub trait AnalysisObserver: Send + Sync {
    /// Outlier detection finished for a metric
    fn outliers_detected(&self, _metric: &str, _outliers: usize, _total: usize) {}

    /// A metric had no configured policy and the fallback was applied
    fn fallback_policy_applied(&self, _metric: &str, _policy: &MetricPolicy) {}

    /// A standard deviation collapsed to zero and a fallback value was used
    fn undefined_variance(&self, _metric: &str, _context: &str) {}

    /// A metric was left out of a batch result
    fn metric_skipped(&self, _metric: &str, _reason: &AnalysisError) {}

    /// A lookback window computation was skipped for a metric
    fn window_skipped(&self, _metric: &str, _window: &str, _reason: &AnalysisError) {}

    /// A batch operation finished
    fn batch_completed(&self, _operation: &str, _metrics: usize, _duration_ms: u64) {}
}

/// Observer that emits structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn outliers_detected(&self, metric: &str, outliers: usize, total: usize) {
        debug!(
            metric = %metric,
            outliers = %outliers,
            total = %total,
            event_type = "outlier_detection",
            "Outlier detection completed"
        );
    }

    fn fallback_policy_applied(&self, metric: &str, policy: &MetricPolicy) {
        let polarity = match policy.polarity {
            Polarity::HigherBetter => "higher_better",
            Polarity::LowerBetter => "lower_better",
        };
        warn!(
            metric = %metric,
            polarity = %polarity,
            z_threshold = %policy.z_threshold,
            event_type = "fallback_policy",
            "No policy configured for metric, applying fallback"
        );
    }

    fn undefined_variance(&self, metric: &str, context: &str) {
        debug!(
            metric = %metric,
            context = %context,
            event_type = "undefined_variance",
            "Standard deviation is zero, using fallback value"
        );
    }

    fn metric_skipped(&self, metric: &str, reason: &AnalysisError) {
        warn!(
            metric = %metric,
            reason = %reason,
            error_code = ?reason.code(),
            event_type = "metric_skipped",
            "Metric skipped"
        );
    }

    fn window_skipped(&self, metric: &str, window: &str, reason: &AnalysisError) {
        debug!(
            metric = %metric,
            window = %window,
            reason = %reason,
            event_type = "window_skipped",
            "Lookback window skipped"
        );
    }

    fn batch_completed(&self, operation: &str, metrics: usize, duration_ms: u64) {
        info!(
            operation = %operation,
            metrics = %metrics,
            duration_ms = %duration_ms,
            event_type = "batch_completed",
            "Analysis batch completed"
        );
    }
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}
