// ABOUTME: Statistical analysis engine for player performance calculations
// ABOUTME: Descriptive statistics, linear quantiles, percentile ranks, and OLS regression with exact p-values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: statistical calculations with controlled ranges

use crate::constants::outliers::{FIRST_QUARTILE, THIRD_QUARTILE};
use crate::constants::trend::MIN_REGRESSION_POINTS;
use crate::errors::AnalysisError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Iteration cap for the incomplete beta continued fraction
const MAX_CF_ITERATIONS: usize = 300;
/// Convergence tolerance for the continued fraction
const CF_EPSILON: f64 = 1.0e-14;
/// Floor that keeps the Lentz recurrence away from division by zero
const CF_FLOOR: f64 = 1.0e-300;

/// Lanczos approximation coefficients (g = 7, n = 9)
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Ordinary least squares fit of value against 0-based index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (change per observation)
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Pearson correlation coefficient (-1 to 1)
    pub correlation: f64,
    /// Standard error of the estimate
    pub standard_error: f64,
    /// Degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
    /// Two-sided p-value of the slope; `None` when undefined
    pub p_value: Option<f64>,
}

/// Stateless statistics used by every analysis component
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Arithmetic mean, `None` for an empty slice
    #[must_use]
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample standard deviation (n - 1 denominator), `None` below two values
    #[must_use]
    pub fn sample_std(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let mean = Self::mean(values)?;
        let sum_sq = values
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>();
        Some((sum_sq / (values.len() - 1) as f64).sqrt())
    }

    /// Median, `None` for an empty slice
    #[must_use]
    pub fn median(values: &[f64]) -> Option<f64> {
        Self::quantile(values, 0.5)
    }

    /// Quantile `q` in `[0, 1]` using linear interpolation between closest ranks
    #[must_use]
    pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
        if values.is_empty() || !(0.0..=1.0).contains(&q) {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self::sorted_quantile(&sorted, q))
    }

    /// Lower and upper quartiles in one sort
    #[must_use]
    pub fn quartiles(values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some((
            Self::sorted_quantile(&sorted, FIRST_QUARTILE),
            Self::sorted_quantile(&sorted, THIRD_QUARTILE),
        ))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: position within [0, len - 1]
    fn sorted_quantile(sorted: &[f64], q: f64) -> f64 {
        let position = q * (sorted.len() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = (lower + 1).min(sorted.len() - 1);
        let fraction = position - lower as f64;
        fraction.mul_add(sorted[upper] - sorted[lower], sorted[lower])
    }

    /// Percentile rank of `score` within `values` (ties averaged), `None` when empty
    #[must_use]
    pub fn percentile_of_score(values: &[f64], score: f64) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let below = values.iter().filter(|v| **v < score).count();
        let at_or_below = values.iter().filter(|v| **v <= score).count();
        let tie_bonus = usize::from(at_or_below > below);
        Some((below + at_or_below + tie_bonus) as f64 * 50.0 / values.len() as f64)
    }

    /// Standard deviation divided by |mean|.
    ///
    /// `None` when the std is undefined or the mean is zero.
    #[must_use]
    pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
        let mean = Self::mean(values)?;
        if mean == 0.0 {
            return None;
        }
        Some(Self::sample_std(values)? / mean.abs())
    }

    /// Linear regression of value against 0-based index
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than two values
    pub fn linear_regression(values: &[f64]) -> Result<RegressionResult, AnalysisError> {
        if values.len() < MIN_REGRESSION_POINTS {
            return Err(AnalysisError::insufficient_data(
                MIN_REGRESSION_POINTS,
                values.len(),
            ));
        }

        let n = values.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / n;

        // Centered sums avoid cancellation on large offsets
        let (sxx, sxy, syy) = values.iter().enumerate().fold(
            (0.0_f64, 0.0_f64, 0.0_f64),
            |(sxx, sxy, syy), (i, y)| {
                let dx = i as f64 - mean_x;
                let dy = y - mean_y;
                (dx.mul_add(dx, sxx), dx.mul_add(dy, sxy), dy.mul_add(dy, syy))
            },
        );

        let slope = sxy / sxx;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let denominator_corr = (sxx * syy).sqrt();
        let correlation = if denominator_corr == 0.0 {
            0.0
        } else {
            (sxy / denominator_corr).clamp(-1.0, 1.0)
        };
        let r_squared = correlation * correlation;

        let sse = values
            .iter()
            .enumerate()
            .map(|(i, actual)| {
                let diff = actual - slope.mul_add(i as f64, intercept);
                diff * diff
            })
            .sum::<f64>();

        let degrees_of_freedom = values.len().saturating_sub(2);
        let standard_error = if degrees_of_freedom > 0 {
            (sse / degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        };

        let p_value = if degrees_of_freedom == 0 {
            None
        } else if standard_error > 0.0 {
            let se_slope = standard_error / sxx.sqrt();
            Some(Self::t_test_p_value(slope / se_slope, degrees_of_freedom))
        } else if slope.abs() > f64::EPSILON {
            // Perfect fit with a non-zero slope
            Some(0.0)
        } else {
            None
        };

        Ok(RegressionResult {
            slope,
            intercept,
            r_squared,
            correlation,
            standard_error,
            degrees_of_freedom,
            p_value,
        })
    }

    /// Two-sided Student-t p-value for `t_stat` with `df` degrees of freedom
    fn t_test_p_value(t_stat: f64, df: usize) -> f64 {
        let df = df as f64;
        let x = df / t_stat.mul_add(t_stat, df);
        Self::regularized_incomplete_beta(x, df / 2.0, 0.5).clamp(0.0, 1.0)
    }

    /// Regularized incomplete beta function `I_x(a, b)`
    fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }

        let ln_front = b.mul_add(
            (1.0 - x).ln(),
            a.mul_add(x.ln(), Self::ln_gamma(a + b) - Self::ln_gamma(a) - Self::ln_gamma(b)),
        );
        let front = ln_front.exp();

        // Continued fraction converges fastest on this side of the mean
        if x < (a + 1.0) / (a + b + 2.0) {
            front * Self::beta_continued_fraction(x, a, b) / a
        } else {
            1.0 - front * Self::beta_continued_fraction(1.0 - x, b, a) / b
        }
    }

    /// Modified Lentz evaluation of the incomplete beta continued fraction
    fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
        let floor = |v: f64| if v.abs() < CF_FLOOR { CF_FLOOR } else { v };

        let qab = a + b;
        let qap = a + 1.0;
        let qam = a - 1.0;
        let mut c = 1.0;
        let mut d = 1.0 / floor((-qab * x / qap) + 1.0);
        let mut h = d;

        for m in 1..=MAX_CF_ITERATIONS {
            let m = m as f64;
            let m2 = 2.0 * m;

            let even = m * (b - m) * x / ((qam + m2) * (a + m2));
            d = 1.0 / floor(even.mul_add(d, 1.0));
            c = floor(1.0 + even / c);
            h *= d * c;

            let odd = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
            d = 1.0 / floor(odd.mul_add(d, 1.0));
            c = floor(1.0 + odd / c);
            let delta = d * c;
            h *= delta;

            if (delta - 1.0).abs() < CF_EPSILON {
                break;
            }
        }
        h
    }

    /// Natural log of the gamma function (Lanczos approximation)
    fn ln_gamma(x: f64) -> f64 {
        if x < 0.5 {
            // Reflection formula
            return (PI / (PI * x).sin().abs()).ln() - Self::ln_gamma(1.0 - x);
        }

        let x = x - 1.0;
        let series = LANCZOS_COEFFICIENTS
            .iter()
            .enumerate()
            .skip(1)
            .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, coef)| {
                acc + coef / (x + i as f64)
            });
        let t = x + LANCZOS_G + 0.5;
        let half_ln_two_pi = 0.5 * (2.0 * PI).ln();
        (x + 0.5).mul_add(t.ln(), half_ln_two_pi) - t + series.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_uses_linear_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((StatisticalAnalyzer::quantile(&values, 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert!((StatisticalAnalyzer::quantile(&values, 0.75).unwrap() - 3.25).abs() < 1e-12);
        assert!((StatisticalAnalyzer::median(&values).unwrap() - 2.5).abs() < 1e-12);
        assert!(StatisticalAnalyzer::quantile(&[], 0.5).is_none());
    }

    #[test]
    fn test_sample_std_uses_n_minus_one() {
        let std = StatisticalAnalyzer::sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.138_089_935).abs() < 1e-6);
        assert!(StatisticalAnalyzer::sample_std(&[1.0]).is_none());
    }

    #[test]
    fn test_percentile_of_score_averages_ties() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((StatisticalAnalyzer::percentile_of_score(&values, 3.0).unwrap() - 75.0).abs() < 1e-12);
        assert!((StatisticalAnalyzer::percentile_of_score(&values, 2.5).unwrap() - 50.0).abs() < 1e-12);
        assert!((StatisticalAnalyzer::percentile_of_score(&values, 10.0).unwrap() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_t_p_value_matches_cauchy_at_one_degree_of_freedom() {
        // P(|T| > 1) for df = 1 is exactly 0.5
        assert!((StatisticalAnalyzer::t_test_p_value(1.0, 1) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_t_p_value_approaches_normal_for_large_df() {
        let p = StatisticalAnalyzer::t_test_p_value(1.96, 10_000);
        assert!((p - 0.05).abs() < 0.001);
    }

    #[test]
    fn test_ln_gamma_integer_factorials() {
        // Gamma(5) = 24
        assert!((StatisticalAnalyzer::ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
        // Gamma(0.5) = sqrt(pi)
        let expected = PI.sqrt().ln();
        assert!((StatisticalAnalyzer::ln_gamma(0.5) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_regression_flat_series_has_undefined_p_value() {
        let result = StatisticalAnalyzer::linear_regression(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert!(result.slope.abs() < 1e-12);
        assert!(result.p_value.is_none());
        assert!(result.correlation.abs() < 1e-12);
    }

    #[test]
    fn test_regression_two_points_has_no_degrees_of_freedom() {
        let result = StatisticalAnalyzer::linear_regression(&[1.0, 3.0]).unwrap();
        assert!((result.slope - 2.0).abs() < 1e-12);
        assert_eq!(result.degrees_of_freedom, 0);
        assert!(result.p_value.is_none());
    }
}
