// ABOUTME: Test utilities shared across integration tests
// ABOUTME: Recording observer capturing analysis events for assertions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use skillpulse::errors::AnalysisError;
use skillpulse::intelligence::AnalysisObserver;
use skillpulse::models::MetricPolicy;
use std::sync::Mutex;

/// Observer that records every event as a short string
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_event(&self, prefix: &str) -> bool {
        self.events().iter().any(|event| event.starts_with(prefix))
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AnalysisObserver for RecordingObserver {
    fn outliers_detected(&self, metric: &str, outliers: usize, total: usize) {
        self.record(format!("outliers:{metric}:{outliers}/{total}"));
    }

    fn fallback_policy_applied(&self, metric: &str, _policy: &MetricPolicy) {
        self.record(format!("fallback:{metric}"));
    }

    fn undefined_variance(&self, metric: &str, context: &str) {
        self.record(format!("variance:{metric}:{context}"));
    }

    fn metric_skipped(&self, metric: &str, reason: &AnalysisError) {
        self.record(format!("skipped:{metric}:{:?}", reason.code()));
    }

    fn window_skipped(&self, metric: &str, window: &str, _reason: &AnalysisError) {
        self.record(format!("window:{metric}:{window}"));
    }

    fn batch_completed(&self, operation: &str, metrics: usize, _duration_ms: u64) {
        self.record(format!("batch:{operation}:{metrics}"));
    }
}
