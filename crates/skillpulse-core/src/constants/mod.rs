// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Metric names, statistical defaults, and tracking defaults for SkillPulse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large namespace. Runtime-tunable values are only defaults here; the
//! intelligence configuration owns the effective values.

/// Well-known metric names with built-in polarity policies
pub mod metric_names {
    /// Shot or aim accuracy (higher is better)
    pub const ACCURACY: &str = "accuracy";
    /// Reaction time (lower is better)
    pub const REACTION_TIME: &str = "reaction_time";
    /// Decision-making quality score (higher is better)
    pub const DECISION_MAKING: &str = "decision_making";
    /// Teamwork score (higher is better)
    pub const TEAMWORK: &str = "teamwork";
}

/// Outlier detection defaults
pub mod outliers {
    /// Default IQR multiplier (Tukey fences)
    pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;
    /// Lower quartile position
    pub const FIRST_QUARTILE: f64 = 0.25;
    /// Upper quartile position
    pub const THIRD_QUARTILE: f64 = 0.75;
}

/// Improvement classification defaults
pub mod improvement {
    /// Number of most recent raw observations averaged for `recent_mean`
    pub const DEFAULT_RECENT_WINDOW_SIZE: usize = 5;
    /// z-score threshold for higher-is-better metrics
    pub const HIGHER_BETTER_Z_THRESHOLD: f64 = -1.0;
    /// z-score threshold for lower-is-better metrics
    pub const LOWER_BETTER_Z_THRESHOLD: f64 = 1.0;
    /// |z| beyond which a regression is ranked high priority
    pub const DEFAULT_HIGH_PRIORITY_Z: f64 = 2.0;
}

/// Trend analysis defaults
pub mod trend {
    /// Minimum points for a regression
    pub const MIN_REGRESSION_POINTS: usize = 2;
    /// |r| above which a trend is at least moderate
    pub const MODERATE_STRENGTH: f64 = 0.3;
    /// |r| above which a trend is strong
    pub const STRONG_STRENGTH: f64 = 0.7;
    /// p-value threshold for significance
    pub const SIGNIFICANCE_ALPHA: f64 = 0.05;
}

/// Progress tracking defaults
pub mod tracking {
    /// Short-term lookback window name
    pub const SHORT_TERM: &str = "short_term";
    /// Medium-term lookback window name
    pub const MEDIUM_TERM: &str = "medium_term";
    /// Long-term lookback window name
    pub const LONG_TERM: &str = "long_term";
    /// Short-term lookback in days
    pub const SHORT_TERM_DAYS: u32 = 7;
    /// Medium-term lookback in days
    pub const MEDIUM_TERM_DAYS: u32 = 30;
    /// Long-term lookback in days
    pub const LONG_TERM_DAYS: u32 = 90;
    /// Default number of interpolated milestones
    pub const DEFAULT_NUM_MILESTONES: usize = 5;
    /// Fractional improvement applied when no target is supplied
    pub const DEFAULT_TARGET_UPLIFT: f64 = 0.2;
    /// Horizon for projected values
    pub const PROJECTION_DAYS: u32 = 30;
    /// Days per week for weekly rates
    pub const DAYS_PER_WEEK: f64 = 7.0;
    /// Consistency score reported for single-point windows
    pub const MAX_CONSISTENCY: f64 = 100.0;
}

/// Summary and suggestion defaults
pub mod summary {
    /// Short-term change (percent) that counts as an improvement or concern
    pub const CHANGE_THRESHOLD_PERCENT: f64 = 5.0;
    /// Consistency score below which consistency becomes a focus area
    pub const CONSISTENCY_FLOOR: f64 = 70.0;
    /// Improving trends weaker than this should be strengthened
    pub const WEAK_TREND_STRENGTH: f64 = 0.5;
    /// Volatility above which performance should be stabilized
    pub const VOLATILITY_CEILING: f64 = 0.2;
    /// Upper bound of the overall progress score
    pub const MAX_PROGRESS_SCORE: f64 = 100.0;
}
