// ABOUTME: Progress summary and improvement suggestion thresholds
// ABOUTME: Change threshold, consistency floor, weak trend strength, and volatility ceiling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::summary;
use serde::{Deserialize, Serialize};

/// Summary and suggestion configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Short-term change (percent) counted as a key improvement or concern
    pub change_threshold_percent: f64,
    /// Consistency score below which consistency is a focus area
    pub consistency_floor: f64,
    /// Improving trends weaker than this should be strengthened
    pub weak_trend_strength: f64,
    /// Volatility above which performance should be stabilized
    pub volatility_ceiling: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            change_threshold_percent: summary::CHANGE_THRESHOLD_PERCENT,
            consistency_floor: summary::CONSISTENCY_FLOOR,
            weak_trend_strength: summary::WEAK_TREND_STRENGTH,
            volatility_ceiling: summary::VOLATILITY_CEILING,
        }
    }
}
