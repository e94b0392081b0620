// ABOUTME: Milestone planning between a current value and a target
// ABOUTME: Evenly spaced, direction-aware milestones with completed, next, and remaining partitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: milestone counts are small

use crate::constants::summary::MAX_PROGRESS_SCORE;
use crate::models::Polarity;
use serde::{Deserialize, Serialize};

/// One interpolated milestone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// 1-based position from current towards target
    pub level: usize,
    /// Value to reach
    pub value: f64,
    /// Share of the current-to-target distance this milestone represents
    pub progress_percent: f64,
}

/// Milestones between current and target, partitioned by completion.
///
/// A milestone is completed once the current value has reached or passed it
/// in the metric's improving direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneProgress {
    /// Value the milestones lead to
    pub target_value: f64,
    /// Every milestone in order
    pub milestones: Vec<Milestone>,
    /// Milestones already reached
    pub completed: Vec<Milestone>,
    /// First unreached milestone
    pub next: Option<Milestone>,
    /// Unreached milestones after `next`
    pub remaining: Vec<Milestone>,
    /// Distance covered towards the target in `[0, 100]`
    pub total_progress: f64,
}

impl MilestoneProgress {
    /// Plan `count` evenly spaced milestones from `current` (exclusive) to `target` (inclusive)
    ///
    /// A target equal to the current value yields no milestones and no progress.
    #[must_use]
    pub fn plan(current: f64, target: f64, count: usize, polarity: Polarity) -> Self {
        let span = target - current;
        if span == 0.0 {
            return Self::unplanned(target);
        }
        let milestones: Vec<Milestone> = (1..=count)
            .map(|level| {
                let fraction = level as f64 / count as f64;
                Milestone {
                    level,
                    value: fraction.mul_add(span, current),
                    progress_percent: fraction * MAX_PROGRESS_SCORE,
                }
            })
            .collect();

        let (completed, unreached): (Vec<Milestone>, Vec<Milestone>) = milestones
            .iter()
            .copied()
            .partition(|milestone| polarity.has_reached(current, milestone.value));
        let mut unreached = unreached.into_iter();
        let next = unreached.next();
        let remaining = unreached.collect();

        let total_progress = if polarity.has_reached(current, target) {
            MAX_PROGRESS_SCORE
        } else {
            0.0
        };

        Self {
            target_value: target,
            milestones,
            completed,
            next,
            remaining,
            total_progress,
        }
    }

    const fn unplanned(target: f64) -> Self {
        Self {
            target_value: target,
            milestones: Vec::new(),
            completed: Vec::new(),
            next: None,
            remaining: Vec::new(),
            total_progress: 0.0,
        }
    }

    /// Most advanced completed milestone
    #[must_use]
    pub fn latest_completed(&self) -> Option<&Milestone> {
        self.completed.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones_evenly_spaced() {
        let progress = MilestoneProgress::plan(50.0, 100.0, 4, Polarity::HigherBetter);
        let values: Vec<f64> = progress.milestones.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![62.5, 75.0, 87.5, 100.0]);
        let percents: Vec<f64> = progress.milestones.iter().map(|m| m.progress_percent).collect();
        assert_eq!(percents, vec![25.0, 50.0, 75.0, 100.0]);
        assert!(progress.completed.is_empty());
        assert_eq!(progress.next.map(|m| m.level), Some(1));
        assert_eq!(progress.remaining.len(), 3);
        assert!(progress.total_progress.abs() < f64::EPSILON);
    }

    #[test]
    fn test_target_behind_current_is_complete() {
        let progress = MilestoneProgress::plan(80.0, 70.0, 5, Polarity::HigherBetter);
        assert_eq!(progress.completed.len(), 5);
        assert!(progress.next.is_none());
        assert!((progress.total_progress - 100.0).abs() < f64::EPSILON);
        assert_eq!(progress.latest_completed().map(|m| m.level), Some(5));
    }

    #[test]
    fn test_target_equal_to_current_has_no_milestones() {
        let progress = MilestoneProgress::plan(42.0, 42.0, 5, Polarity::HigherBetter);
        assert!(progress.milestones.is_empty());
        assert!(progress.completed.is_empty());
        assert!(progress.next.is_none());
        assert!(progress.latest_completed().is_none());
        assert!(progress.total_progress.abs() < f64::EPSILON);
    }

    #[test]
    fn test_lower_better_milestones_descend() {
        let progress = MilestoneProgress::plan(300.0, 240.0, 3, Polarity::LowerBetter);
        let values: Vec<f64> = progress.milestones.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![280.0, 260.0, 240.0]);
        assert!(progress.completed.is_empty());
    }
}
