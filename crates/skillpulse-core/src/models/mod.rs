// ABOUTME: Core data models for player performance analytics
// ABOUTME: Validated metric series, tabular history, and per-metric polarity policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models consumed by the analytics engine.
//!
//! Every model here is an immutable value object: it is validated once at
//! construction and read-only afterwards.

mod polarity;
mod series;

pub use polarity::{MetricPolicy, MetricPolicyTable, Polarity, PolicySource};
pub use series::{MetricSeries, PerformanceHistory, PerformanceRecord, SeriesPoint};
