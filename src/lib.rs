// ABOUTME: Main library entry point for the SkillPulse player performance analytics core
// ABOUTME: Re-exports the core models and intelligence engine behind a single facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # SkillPulse
//!
//! Analytics core for competitive player performance data. Given timestamped
//! metric histories it detects outliers, fits trends, decides which metrics
//! need improvement, and tracks progress towards targets across lookback
//! windows.
//!
//! ## Architecture
//!
//! - **Core** (`skillpulse-core`): error codes, constants, validated models
//! - **Intelligence** (`skillpulse-intelligence`): statistics and analysis components
//! - **Engine**: [`PerformanceEngine`] facade combining every component
//! - **Logging**: opt-in `tracing-subscriber` setup for embedding applications
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skillpulse::errors::AppResult;
//! use skillpulse::intelligence::IntelligenceConfig;
//! use skillpulse::models::{MetricSeries, PerformanceHistory};
//! use skillpulse::PerformanceEngine;
//! use chrono::Utc;
//!
//! fn main() -> AppResult<()> {
//!     let engine = PerformanceEngine::new(IntelligenceConfig::default())?;
//!     let history = PerformanceHistory::new().with_series(MetricSeries::daily(
//!         "accuracy",
//!         Utc::now(),
//!         &[70.0, 71.0, 69.0, 70.0, 40.0],
//!     )?);
//!
//!     for (metric, classification) in engine.analyze_performance(&history) {
//!         println!("{metric}: {}", classification.improvement_analysis.needs_improvement);
//!     }
//!     Ok(())
//! }
//! ```

/// Unified error handling
pub use skillpulse_core::errors;

/// Domain constants
pub use skillpulse_core::constants;

/// Validated data models
pub use skillpulse_core::models;

/// Analysis components and configuration
pub use skillpulse_intelligence as intelligence;

/// Performance engine facade
pub mod engine;

/// Structured logging setup
pub mod logging;

pub use engine::{PerformanceEngine, PlayerAnalysis, PlayerSnapshot};
