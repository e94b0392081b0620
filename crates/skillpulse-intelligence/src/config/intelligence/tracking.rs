// ABOUTME: Progress tracking configuration with named lookback windows
// ABOUTME: Parses `name:days` window lists and holds milestone and projection defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::tracking;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named lookback window measured in days back from the reference time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookbackWindow {
    /// Window name used as the report key (e.g. `short_term`)
    pub name: String,
    /// Days back from the reference time
    pub days: u32,
}

impl LookbackWindow {
    /// Create a window
    #[must_use]
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }
}

impl FromStr for LookbackWindow {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, days) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidWindow(format!("expected name:days, got '{s}'")))?;
        let days = days
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidWindow(format!("invalid day count in '{s}'")))?;
        Ok(Self::new(name.trim(), days))
    }
}

/// Ordered list of lookback windows; order is preserved in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookbackWindows(pub Vec<LookbackWindow>);

impl LookbackWindows {
    /// Windows in configured order
    pub fn iter(&self) -> impl Iterator<Item = &LookbackWindow> {
        self.0.iter()
    }

    /// Look up a window by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LookbackWindow> {
        self.0.iter().find(|window| window.name == name)
    }

    /// Shortest window, used as the short-term view by the summarizer
    #[must_use]
    pub fn shortest(&self) -> Option<&LookbackWindow> {
        self.0.iter().min_by_key(|window| window.days)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::InvalidWindow(
                "at least one lookback window is required".to_owned(),
            ));
        }
        for (index, window) in self.0.iter().enumerate() {
            if window.name.is_empty() {
                return Err(ConfigError::InvalidWindow(format!(
                    "window {index} has an empty name"
                )));
            }
            if window.days == 0 {
                return Err(ConfigError::InvalidWindow(format!(
                    "window '{}' must span at least one day",
                    window.name
                )));
            }
            if self.0[..index].iter().any(|w| w.name == window.name) {
                return Err(ConfigError::InvalidWindow(format!(
                    "duplicate window name '{}'",
                    window.name
                )));
            }
        }
        Ok(())
    }
}

impl Default for LookbackWindows {
    fn default() -> Self {
        Self(vec![
            LookbackWindow::new(tracking::SHORT_TERM, tracking::SHORT_TERM_DAYS),
            LookbackWindow::new(tracking::MEDIUM_TERM, tracking::MEDIUM_TERM_DAYS),
            LookbackWindow::new(tracking::LONG_TERM, tracking::LONG_TERM_DAYS),
        ])
    }
}

impl FromStr for LookbackWindows {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for LookbackWindows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, window) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", window.name, window.days)?;
        }
        Ok(())
    }
}

/// Progress tracking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Named lookback windows
    pub lookback_windows: LookbackWindows,
    /// Number of interpolated milestones between current and target
    pub num_milestones: usize,
    /// Fractional improvement used when no target is supplied
    pub default_target_uplift: f64,
    /// Horizon of the projected value
    pub projection_days: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            lookback_windows: LookbackWindows::default(),
            num_milestones: tracking::DEFAULT_NUM_MILESTONES,
            default_target_uplift: tracking::DEFAULT_TARGET_UPLIFT,
            projection_days: tracking::PROJECTION_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_list() {
        let windows: LookbackWindows = "week:7, fortnight:14".parse().unwrap();
        assert_eq!(
            windows.0,
            vec![LookbackWindow::new("week", 7), LookbackWindow::new("fortnight", 14)]
        );
        assert_eq!(windows.to_string(), "week:7,fortnight:14");
    }

    #[test]
    fn test_parse_rejects_missing_days() {
        assert!("week".parse::<LookbackWindows>().is_err());
        assert!("week:soon".parse::<LookbackWindows>().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_zero_days() {
        let duplicate = LookbackWindows(vec![
            LookbackWindow::new("a", 7),
            LookbackWindow::new("a", 30),
        ]);
        assert!(duplicate.validate().is_err());
        assert!(LookbackWindows(vec![LookbackWindow::new("a", 0)]).validate().is_err());
        assert!(LookbackWindows(Vec::new()).validate().is_err());
    }

    #[test]
    fn test_shortest_window() {
        let windows = LookbackWindows::default();
        assert_eq!(windows.shortest().map(|w| w.name.as_str()), Some("short_term"));
    }
}
