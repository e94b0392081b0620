// ABOUTME: Core types and constants for SkillPulse player performance analytics
// ABOUTME: Foundation crate with error handling, metric series models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `SkillPulse` Core
//!
//! Foundation crate providing shared types and constants for the `SkillPulse`
//! analytics core. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   recoverable `AnalysisError` taxonomy
//! - **models**: Validated metric time series and the metric polarity table
//! - **constants**: Well-known metric names and analysis defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Well-known metric names and analysis defaults organized by domain
pub mod constants;

/// Core data models (`MetricSeries`, `PerformanceHistory`, `Polarity`, etc.)
pub mod models;
