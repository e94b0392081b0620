// ABOUTME: Unit tests for statistical analysis and trend regression
// ABOUTME: Validates regression fits, p-values, strength buckets, and polarity-aware direction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use skillpulse::errors::{AnalysisError, ErrorCode};
use skillpulse::intelligence::config::intelligence::TrendConfig;
use skillpulse::intelligence::{
    StatisticalAnalyzer, TrendAnalyzer, TrendDirection, TrendStrength,
};
use skillpulse::models::Polarity;

fn analyzer() -> TrendAnalyzer {
    TrendAnalyzer::new(TrendConfig::default())
}

#[test]
fn test_linear_regression_perfect_positive_correlation() {
    let result = StatisticalAnalyzer::linear_regression(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();

    assert!((result.slope - 1.0).abs() < 0.001);
    assert!((result.intercept - 1.0).abs() < 0.001);
    assert!((result.correlation - 1.0).abs() < 0.001);
    assert!((result.r_squared - 1.0).abs() < 0.001);
    assert_eq!(result.p_value, Some(0.0));
}

#[test]
fn test_linear_regression_perfect_negative_correlation() {
    let result = StatisticalAnalyzer::linear_regression(&[5.0, 4.0, 3.0, 2.0, 1.0]).unwrap();

    assert!((result.slope - (-1.0)).abs() < 0.001);
    assert!((result.correlation - (-1.0)).abs() < 0.001);
    assert!((result.r_squared - 1.0).abs() < 0.001);
}

#[test]
fn test_linear_regression_p_value_matches_t_distribution() {
    let result = StatisticalAnalyzer::linear_regression(&[1.0, 3.0, 2.0, 4.0, 3.0, 5.0]).unwrap();

    assert!((result.slope - 0.628_571).abs() < 0.001);
    assert!((result.correlation - 0.831_522).abs() < 0.001);
    assert_eq!(result.degrees_of_freedom, 4);
    assert!((result.p_value.unwrap() - 0.040_186).abs() < 0.0005);
}

#[test]
fn test_insufficient_data_points() {
    let error = analyzer().analyze(&[1.0]).unwrap_err();
    assert_eq!(
        error,
        AnalysisError::InsufficientData {
            required: 2,
            actual: 1
        }
    );
    assert_eq!(error.code(), ErrorCode::InsufficientData);
    assert!(analyzer().analyze(&[]).is_err());
}

#[test]
fn test_trend_strength_buckets() {
    let strong = analyzer().analyze(&[1.0, 3.0, 2.0, 4.0, 3.0, 5.0]).unwrap();
    assert_eq!(strong.strength, TrendStrength::Strong);
    assert!(strong.significance);

    let moderate = analyzer().analyze(&[2.0, 1.0, 3.0, 1.0, 2.0, 3.0]).unwrap();
    assert_eq!(moderate.strength, TrendStrength::Moderate);
    assert_eq!(moderate.direction, TrendDirection::Improving);
    assert!(!moderate.significance);
    assert!((moderate.p_value.unwrap() - 0.485).abs() < 0.001);

    let weak = analyzer().analyze(&[2.0, 3.0, 1.0, 3.0, 1.0, 2.0]).unwrap();
    assert_eq!(weak.strength, TrendStrength::Weak);
    assert_eq!(weak.direction, TrendDirection::Declining);
    assert!((weak.strength_score - 0.239).abs() < 0.001);
}

#[test]
fn test_two_points_are_never_significant() {
    let trend = analyzer().analyze(&[10.0, 20.0]).unwrap();
    assert_eq!(trend.direction, TrendDirection::Improving);
    assert!(trend.p_value.is_none());
    assert!(!trend.significance);
    assert_eq!(trend.sample_size, 2);
}

#[test]
fn test_flat_series_is_weak_and_not_significant() {
    let trend = analyzer().analyze(&[7.0, 7.0, 7.0, 7.0]).unwrap();
    assert_eq!(trend.strength, TrendStrength::Weak);
    assert_eq!(trend.direction, TrendDirection::Declining);
    assert!(!trend.significance);
    assert_eq!(trend.volatility, Some(0.0));
}

#[test]
fn test_lower_better_negative_slope_is_improving() {
    let values = [300.0, 290.0, 285.0, 270.0, 260.0];
    let trend = analyzer()
        .analyze_with_polarity(&values, Polarity::LowerBetter)
        .unwrap();
    assert!(trend.slope < 0.0);
    assert_eq!(trend.direction, TrendDirection::Improving);
    assert!(trend.signed_strength() > 0.0);

    let higher = analyzer().analyze(&values).unwrap();
    assert_eq!(higher.direction, TrendDirection::Declining);
    assert!(higher.signed_strength() < 0.0);
}

#[test]
fn test_volatility_is_coefficient_of_variation() {
    let trend = analyzer().analyze(&[10.0, 40.0, 10.0, 40.0]).unwrap();
    // std = sqrt(300), mean = 25
    assert!((trend.volatility.unwrap() - 300.0_f64.sqrt() / 25.0).abs() < 1e-9);

    let centred = analyzer().analyze(&[-1.0, 1.0, -1.0, 1.0]).unwrap();
    assert!(centred.volatility.is_none());
}

#[test]
fn test_custom_strength_thresholds() {
    let config = TrendConfig {
        moderate_strength: 0.1,
        strong_strength: 0.3,
        significance_alpha: 0.5,
    };
    let trend = TrendAnalyzer::new(config)
        .analyze(&[2.0, 1.0, 3.0, 1.0, 2.0, 3.0])
        .unwrap();
    assert_eq!(trend.strength, TrendStrength::Strong);
    assert!(trend.significance);
}

#[test]
fn test_percentile_and_quantile_helpers() {
    let values = [10.0, 20.0, 30.0, 40.0, 50.0];
    assert!((StatisticalAnalyzer::percentile_of_score(&values, 30.0).unwrap() - 60.0).abs() < 1e-9);
    assert!((StatisticalAnalyzer::percentile_of_score(&values, 5.0).unwrap()).abs() < 1e-9);
    assert_eq!(StatisticalAnalyzer::quartiles(&values), Some((20.0, 40.0)));
    assert!(StatisticalAnalyzer::coefficient_of_variation(&[0.0, 0.0]).is_none());
}
