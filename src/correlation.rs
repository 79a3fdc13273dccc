//! Pairwise Pearson correlation
//!
//! Quantifies the linear relationship between two aligned numeric series,
//! e.g. nightly sleep duration vs. next-day mood. Degenerate inputs (short
//! or constant series) yield `None` rather than a propagated NaN.

use crate::error::EngineError;
use crate::types::{Category, CorrelationDirection, CorrelationResult, CorrelationStrength};

/// Minimum sample size for a stable coefficient
pub const MIN_SAMPLES: usize = 3;

/// |r| above this is a strong correlation
pub const STRONG_THRESHOLD: f64 = 0.7;

/// |r| above this (up to the strong threshold) is moderate
pub const MODERATE_THRESHOLD: f64 = 0.4;

/// Pearson product-moment coefficient for two equal-length series.
///
/// Returns `Ok(None)` when the series are too short or either has zero
/// variance. Mismatched lengths and non-finite samples are caller bugs and
/// raise. The coefficient is clamped to [-1, 1] against floating-point
/// drift.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Option<f64>, EngineError> {
    if x.len() != y.len() {
        return Err(EngineError::SeriesLengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    for series in [x, y] {
        for (index, value) in series.iter().enumerate() {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteSample(index));
            }
        }
    }

    let n = x.len();
    if n < MIN_SAMPLES {
        return Ok(None);
    }

    let n_f = n as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|a| a * a).sum();

    let var_x = n_f * sum_x2 - sum_x * sum_x;
    let var_y = n_f * sum_y2 - sum_y * sum_y;

    // A constant series has zero variance; rounding can leave a tiny
    // residual, so treat anything at numeric noise level as zero.
    let noise_floor = f64::EPSILON * n_f * n_f;
    if var_x.abs() <= noise_floor * sum_x2.max(1.0) || var_y.abs() <= noise_floor * sum_y2.max(1.0)
    {
        return Ok(None);
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return Ok(None);
    }

    let covariance = n_f * sum_xy - sum_x * sum_y;
    Ok(Some((covariance / denominator).clamp(-1.0, 1.0)))
}

/// Classify a coefficient into strength and direction buckets.
pub fn classify(coefficient: f64) -> (CorrelationStrength, CorrelationDirection) {
    let strength = if coefficient.abs() > STRONG_THRESHOLD {
        CorrelationStrength::Strong
    } else if coefficient.abs() > MODERATE_THRESHOLD {
        CorrelationStrength::Moderate
    } else {
        CorrelationStrength::Weak
    };
    let direction = if coefficient < 0.0 {
        CorrelationDirection::Negative
    } else {
        CorrelationDirection::Positive
    };
    (strength, direction)
}

/// Correlate two labeled metric series.
///
/// `Ok(None)` is the insufficient-data signal; it is not an error.
pub fn correlate(
    metric_a: Category,
    metric_b: Category,
    x: &[f64],
    y: &[f64],
) -> Result<Option<CorrelationResult>, EngineError> {
    let coefficient = match pearson(x, y)? {
        Some(r) => r,
        None => return Ok(None),
    };
    let (strength, direction) = classify(coefficient);
    Ok(Some(CorrelationResult {
        metric_a,
        metric_b,
        coefficient,
        strength,
        direction,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mismatched_lengths_raise() {
        let err = pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::SeriesLengthMismatch { left: 2, right: 3 }
        ));
    }

    #[test]
    fn test_short_series_is_insufficient() {
        assert_eq!(pearson(&[1.0, 2.0], &[2.0, 4.0]).unwrap(), None);
        assert_eq!(pearson(&[], &[]).unwrap(), None);
    }

    #[test]
    fn test_constant_series_is_insufficient_not_nan() {
        let result = pearson(&[5.0, 5.0, 5.0, 5.0], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(result, None);

        // Both sides constant
        let result = pearson(&[0.1, 0.1, 0.1], &[0.2, 0.2, 0.2]).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_non_finite_sample_raises() {
        let err = pearson(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteSample(_)));
    }

    #[test]
    fn test_perfect_positive_correlation() {
        let result = correlate(
            Category::Sleep,
            Category::Mood,
            &[1.0, 2.0, 3.0],
            &[1.0, 2.0, 3.0],
        )
        .unwrap()
        .unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-9);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        assert_eq!(result.direction, CorrelationDirection::Positive);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let result = correlate(
            Category::Sleep,
            Category::Mood,
            &[1.0, 2.0, 3.0],
            &[3.0, 2.0, 1.0],
        )
        .unwrap()
        .unwrap();
        assert!((result.coefficient + 1.0).abs() < 1e-9);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        assert_eq!(result.direction, CorrelationDirection::Negative);
    }

    #[test]
    fn test_coefficient_stays_in_range() {
        // Near-collinear data with magnitudes that invite rounding drift.
        let x: Vec<f64> = (0..50).map(|i| 1e6 + i as f64 * 0.001).collect();
        let y: Vec<f64> = x.iter().map(|v| v * 2.0 + 1.0).collect();
        let r = pearson(&x, &y).unwrap();
        if let Some(r) = r {
            assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(classify(0.71).0, CorrelationStrength::Strong);
        assert_eq!(classify(0.7).0, CorrelationStrength::Moderate);
        assert_eq!(classify(0.41).0, CorrelationStrength::Moderate);
        assert_eq!(classify(0.4).0, CorrelationStrength::Weak);
        assert_eq!(classify(-0.9).0, CorrelationStrength::Strong);
        assert_eq!(classify(0.0).0, CorrelationStrength::Weak);
    }

    #[test]
    fn test_uncorrelated_data_is_weak() {
        let result = correlate(
            Category::Water,
            Category::Mood,
            &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0],
            &[3.0, 3.1, 2.9, 3.0, 3.2, 2.8],
        )
        .unwrap()
        .unwrap();
        assert_eq!(result.strength, CorrelationStrength::Weak);
    }
}
