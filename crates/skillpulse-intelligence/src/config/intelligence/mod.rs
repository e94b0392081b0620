// ABOUTME: Intelligence module configuration for player performance analysis
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides type-safe, validated configuration for every analysis component.
//! Configuration is built once (defaults, then `SKILLPULSE_*` environment
//! overrides, then validation) and handed by value to the components that
//! need it. It is never mutated afterwards.
//!
//! # Module Structure
//!
//! - `analysis` - Outlier fences, improvement policies, trend strength buckets
//! - `tracking` - Lookback windows, milestones, projection horizon
//! - `summary` - Summary and suggestion thresholds

pub mod analysis;
pub mod error;
pub mod summary;
pub mod tracking;

pub use analysis::{ImprovementConfig, OutlierConfig, TrendConfig};
pub use error::ConfigError;
pub use summary::SummaryConfig;
pub use tracking::{LookbackWindow, LookbackWindows, TrackingConfig};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Outlier detection configuration
    pub outliers: OutlierConfig,
    /// Improvement classification configuration
    pub improvement: ImprovementConfig,
    /// Trend regression configuration
    pub trend: TrendConfig,
    /// Progress tracking configuration
    pub tracking: TrackingConfig,
    /// Summary and suggestion thresholds
    pub summary: SummaryConfig,
}

impl IntelligenceConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        let multiplier = self.outliers.iqr_multiplier;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "iqr_multiplier must be a positive finite number",
            ));
        }

        if self.improvement.recent_window_size == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "recent_window_size must be at least 1",
            ));
        }
        if !self.improvement.high_priority_z.is_finite() || self.improvement.high_priority_z < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "high_priority_z must be a non-negative finite number",
            ));
        }
        let policies = &self.improvement.metric_policies;
        if !policies.fallback().z_threshold.is_finite()
            || policies.entries().any(|(_, policy)| !policy.z_threshold.is_finite())
        {
            return Err(ConfigError::ValueOutOfRange(
                "metric policy z thresholds must be finite",
            ));
        }

        self.validate_trend()?;

        self.tracking.lookback_windows.validate()?;
        if self.tracking.num_milestones == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "num_milestones must be at least 1",
            ));
        }
        let uplift = self.tracking.default_target_uplift;
        if !uplift.is_finite() || uplift <= 0.0 || uplift >= 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "default_target_uplift must be within (0, 1)",
            ));
        }
        if self.tracking.projection_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "projection_days must be at least 1",
            ));
        }

        self.validate_summary()
    }

    fn validate_trend(&self) -> Result<(), ConfigError> {
        let trend = &self.trend;
        if !(0.0..=1.0).contains(&trend.moderate_strength)
            || !(0.0..=1.0).contains(&trend.strong_strength)
        {
            return Err(ConfigError::ValueOutOfRange(
                "trend strength thresholds must be within [0, 1]",
            ));
        }
        if trend.moderate_strength >= trend.strong_strength {
            return Err(ConfigError::InvalidRange(
                "moderate_strength must be < strong_strength",
            ));
        }
        if !(trend.significance_alpha > 0.0 && trend.significance_alpha < 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "significance_alpha must be within (0, 1)",
            ));
        }
        Ok(())
    }

    fn validate_summary(&self) -> Result<(), ConfigError> {
        let summary = &self.summary;
        let thresholds = [
            summary.change_threshold_percent,
            summary.consistency_floor,
            summary.weak_trend_strength,
            summary.volatility_ceiling,
        ];
        if thresholds.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "summary thresholds must be non-negative finite numbers",
            ));
        }
        if summary.consistency_floor > 100.0 {
            return Err(ConfigError::ValueOutOfRange(
                "consistency_floor must be <= 100",
            ));
        }
        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "SKILLPULSE_OUTLIER_IQR_MULTIPLIER",
            &mut self.outliers.iqr_multiplier,
        )?;

        Self::apply_env_var(
            "SKILLPULSE_RECENT_WINDOW_SIZE",
            &mut self.improvement.recent_window_size,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_HIGH_PRIORITY_Z",
            &mut self.improvement.high_priority_z,
        )?;

        Self::apply_env_var(
            "SKILLPULSE_TREND_MODERATE_STRENGTH",
            &mut self.trend.moderate_strength,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_TREND_STRONG_STRENGTH",
            &mut self.trend.strong_strength,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_TREND_SIGNIFICANCE_ALPHA",
            &mut self.trend.significance_alpha,
        )?;

        Self::apply_env_var(
            "SKILLPULSE_LOOKBACK_WINDOWS",
            &mut self.tracking.lookback_windows,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_NUM_MILESTONES",
            &mut self.tracking.num_milestones,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_DEFAULT_TARGET_UPLIFT",
            &mut self.tracking.default_target_uplift,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_PROJECTION_DAYS",
            &mut self.tracking.projection_days,
        )?;

        Self::apply_env_var(
            "SKILLPULSE_SUMMARY_CHANGE_THRESHOLD",
            &mut self.summary.change_threshold_percent,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_CONSISTENCY_FLOOR",
            &mut self.summary.consistency_floor,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_WEAK_TREND_STRENGTH",
            &mut self.summary.weak_trend_strength,
        )?;
        Self::apply_env_var(
            "SKILLPULSE_VOLATILITY_CEILING",
            &mut self.summary.volatility_ceiling,
        )?;

        Ok(self)
    }
}
