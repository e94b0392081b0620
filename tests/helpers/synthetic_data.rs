// ABOUTME: Synthetic player metric generator for automated analytics testing
// ABOUTME: Creates deterministic daily series with stable, trending, and slumping patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use skillpulse::models::{MetricSeries, SeriesPoint};

/// Fixed analysis reference time so window membership is reproducible
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

/// `days` days before the reference time
pub fn days_ago(days: i64) -> DateTime<Utc> {
    reference_time() - Duration::days(days)
}

/// Daily series whose last value falls on the reference time
pub fn daily_series(metric: &str, values: &[f64]) -> MetricSeries {
    MetricSeries::daily(metric, reference_time(), values).unwrap()
}

/// Daily series whose last value falls `days` before the reference time
pub fn daily_series_ending(metric: &str, days: i64, values: &[f64]) -> MetricSeries {
    MetricSeries::daily(metric, days_ago(days), values).unwrap()
}

/// Training patterns for generated series
#[derive(Debug, Clone, Copy)]
pub enum PlayerPattern {
    /// Flat performance with small noise
    Stable,
    /// Steady gain per day
    Improving,
    /// Stable history followed by a sharp slump
    RecentSlump,
}

/// Builder for deterministic synthetic metric series
#[derive(Debug, Clone)]
pub struct SyntheticSeriesBuilder {
    rng: ChaCha8Rng,
}

impl SyntheticSeriesBuilder {
    /// Create new builder with deterministic seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `days` daily values ending at the reference time
    pub fn generate(
        &mut self,
        metric: &str,
        pattern: PlayerPattern,
        days: usize,
        center: f64,
        noise: f64,
    ) -> MetricSeries {
        let values: Vec<f64> = (0..days)
            .map(|day| {
                let jitter = self.rng.gen_range(-noise..=noise);
                match pattern {
                    PlayerPattern::Stable => center + jitter,
                    PlayerPattern::Improving => center + day as f64 * 0.5 + jitter,
                    PlayerPattern::RecentSlump if day + 3 >= days => center * 0.6 + jitter,
                    PlayerPattern::RecentSlump => center + jitter,
                }
            })
            .collect();
        daily_series(metric, &values)
    }

    /// Generate irregularly spaced points (1-3 days apart) ending at the reference time
    pub fn irregular(&mut self, metric: &str, count: usize, center: f64, noise: f64) -> MetricSeries {
        let mut offset = 0_i64;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(SeriesPoint::new(
                days_ago(offset),
                center + self.rng.gen_range(-noise..=noise),
            ));
            offset += self.rng.gen_range(1..=3);
        }
        points.reverse();
        MetricSeries::new(metric, points).unwrap()
    }
}
