// ABOUTME: Metric polarity and per-metric improvement threshold policies
// ABOUTME: Closed HigherBetter/LowerBetter enum with an explicit table and fallback policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{improvement, metric_names};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which direction of change counts as improvement for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Larger values are better (accuracy, teamwork)
    #[default]
    HigherBetter,
    /// Smaller values are better (reaction time)
    LowerBetter,
}

impl Polarity {
    /// +1 for higher-is-better, -1 for lower-is-better.
    ///
    /// Multiplying a raw change by this sign yields an improvement-positive
    /// change regardless of polarity.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::HigherBetter => 1.0,
            Self::LowerBetter => -1.0,
        }
    }

    /// Whether `value` has reached or passed `milestone` in the improving direction
    #[must_use]
    pub fn has_reached(self, value: f64, milestone: f64) -> bool {
        match self {
            Self::HigherBetter => value >= milestone,
            Self::LowerBetter => value <= milestone,
        }
    }
}

/// Improvement decision policy for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPolicy {
    /// Direction of improvement
    pub polarity: Polarity,
    /// z-score threshold; crossing it in the regressing direction flags the metric
    pub z_threshold: f64,
}

impl MetricPolicy {
    /// Higher-is-better policy with the default threshold
    #[must_use]
    pub const fn higher_better() -> Self {
        Self {
            polarity: Polarity::HigherBetter,
            z_threshold: improvement::HIGHER_BETTER_Z_THRESHOLD,
        }
    }

    /// Lower-is-better policy with the default threshold
    #[must_use]
    pub const fn lower_better() -> Self {
        Self {
            polarity: Polarity::LowerBetter,
            z_threshold: improvement::LOWER_BETTER_Z_THRESHOLD,
        }
    }

    /// Whether `z_score` crosses the threshold in the regressing direction
    #[must_use]
    pub fn is_regression(&self, z_score: f64) -> bool {
        match self.polarity {
            Polarity::HigherBetter => z_score < self.z_threshold,
            Polarity::LowerBetter => z_score > self.z_threshold,
        }
    }
}

impl Default for MetricPolicy {
    fn default() -> Self {
        Self::higher_better()
    }
}

/// Where a resolved policy came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySource {
    /// Metric has an explicit entry in the table
    Configured,
    /// Metric is unknown and the fallback policy was applied
    Fallback,
}

/// Explicit per-metric policy table with a fallback for unknown metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPolicyTable {
    policies: BTreeMap<String, MetricPolicy>,
    fallback: MetricPolicy,
}

impl MetricPolicyTable {
    /// Table with no entries; every lookup resolves to `fallback`
    #[must_use]
    pub const fn empty(fallback: MetricPolicy) -> Self {
        Self {
            policies: BTreeMap::new(),
            fallback,
        }
    }

    /// Add or replace the policy for `metric`
    #[must_use]
    pub fn with_policy(mut self, metric: impl Into<String>, policy: MetricPolicy) -> Self {
        self.policies.insert(metric.into(), policy);
        self
    }

    /// Replace the fallback policy
    #[must_use]
    pub fn with_fallback(mut self, fallback: MetricPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve the policy for `metric` and report whether the fallback was used
    #[must_use]
    pub fn resolve(&self, metric: &str) -> (MetricPolicy, PolicySource) {
        self.policies.get(metric).map_or(
            (self.fallback, PolicySource::Fallback),
            |policy| (*policy, PolicySource::Configured),
        )
    }

    /// Polarity for `metric` (fallback polarity when unknown)
    #[must_use]
    pub fn polarity(&self, metric: &str) -> Polarity {
        self.resolve(metric).0.polarity
    }

    /// Fallback policy applied to unknown metrics
    #[must_use]
    pub const fn fallback(&self) -> MetricPolicy {
        self.fallback
    }

    /// Configured entries ordered by metric name
    pub fn entries(&self) -> impl Iterator<Item = (&str, &MetricPolicy)> {
        self.policies.iter().map(|(name, policy)| (name.as_str(), policy))
    }
}

impl Default for MetricPolicyTable {
    fn default() -> Self {
        Self::empty(MetricPolicy::higher_better())
            .with_policy(metric_names::ACCURACY, MetricPolicy::higher_better())
            .with_policy(metric_names::REACTION_TIME, MetricPolicy::lower_better())
            .with_policy(metric_names::DECISION_MAKING, MetricPolicy::higher_better())
            .with_policy(metric_names::TEAMWORK, MetricPolicy::higher_better())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_matches_builtin_polarities() {
        let table = MetricPolicyTable::default();
        assert_eq!(table.polarity("accuracy"), Polarity::HigherBetter);
        assert_eq!(table.polarity("reaction_time"), Polarity::LowerBetter);
        assert_eq!(
            table.resolve("teamwork"),
            (MetricPolicy::higher_better(), PolicySource::Configured)
        );
    }

    #[test]
    fn test_unknown_metric_uses_fallback() {
        let (policy, source) = MetricPolicyTable::default().resolve("map_awareness");
        assert_eq!(source, PolicySource::Fallback);
        assert_eq!(policy.polarity, Polarity::HigherBetter);
        assert!((policy.z_threshold + 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_regression_direction_follows_polarity() {
        assert!(MetricPolicy::higher_better().is_regression(-1.5));
        assert!(!MetricPolicy::higher_better().is_regression(1.5));
        assert!(MetricPolicy::lower_better().is_regression(1.5));
        assert!(!MetricPolicy::lower_better().is_regression(-1.5));
    }

    #[test]
    fn test_has_reached_is_direction_aware() {
        assert!(Polarity::HigherBetter.has_reached(80.0, 75.0));
        assert!(!Polarity::LowerBetter.has_reached(80.0, 75.0));
        assert!(Polarity::LowerBetter.has_reached(200.0, 210.0));
    }
}
