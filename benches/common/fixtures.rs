// ABOUTME: Benchmark fixtures generating realistic player metric histories
// ABOUTME: Seeded generation keeps measurements reproducible across runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for player metric histories.

use chrono::{DateTime, TimeZone, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use skillpulse::models::{MetricSeries, PerformanceHistory};
use std::collections::BTreeMap;

/// Metrics generated for every fixture player: name, center, noise
const METRICS: [(&str, f64, f64); 4] = [
    ("accuracy", 65.0, 6.0),
    ("reaction_time", 250.0, 20.0),
    ("decision_making", 7.0, 1.0),
    ("teamwork", 8.0, 0.8),
];

/// Predefined history lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum HistoryLength {
    /// One month of daily observations
    Month,
    /// One season of daily observations
    Season,
    /// Two years of daily observations
    Career,
}

impl HistoryLength {
    #[must_use]
    pub const fn days(self) -> usize {
        match self {
            Self::Month => 30,
            Self::Season => 120,
            Self::Career => 730,
        }
    }
}

/// Fixed reference time for window anchoring
#[allow(clippy::expect_used)]
#[must_use]
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0)
        .single()
        .expect("valid reference time")
}

/// Noisy daily values around `center` with a slight upward drift
pub fn generate_values(rng: &mut ChaCha8Rng, days: usize, center: f64, noise: f64) -> Vec<f64> {
    (0..days)
        .map(|day| center + day as f64 * noise * 0.01 + rng.gen_range(-noise..=noise))
        .collect()
}

/// History covering every fixture metric, ending at the reference time
#[allow(clippy::expect_used)]
#[must_use]
pub fn generate_history(length: HistoryLength, seed: u64) -> PerformanceHistory {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    METRICS
        .iter()
        .fold(PerformanceHistory::new(), |history, (metric, center, noise)| {
            let values = generate_values(&mut rng, length.days(), *center, *noise);
            history.with_series(
                MetricSeries::daily(*metric, reference_time(), &values)
                    .expect("generated values are finite"),
            )
        })
}

/// Latest value per fixture metric
#[must_use]
pub fn current_values() -> BTreeMap<String, f64> {
    METRICS
        .iter()
        .map(|(metric, center, _)| ((*metric).to_owned(), *center))
        .collect()
}
