//! Configuration errors
//!
//! Malformed configuration is rejected when a generator or stream is
//! constructed. Nothing is ever silently normalized.

use thiserror::Error;

/// Tolerance used when checking that probability vectors sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Errors raised while validating generator, stream or orchestrator configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: &'static str },

    #[error("length mismatch: {means} means but {weights} weights")]
    LengthMismatch { means: usize, weights: usize },

    #[error("{name} must sum to 1 (got {sum})")]
    WeightsDoNotSumToOne { name: &'static str, sum: f64 },

    #[error("{name} contains a negative or non-finite weight: {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("probability {name} must lie in {range} (got {value})")]
    InvalidProbability {
        name: &'static str,
        range: &'static str,
        value: f64,
    },

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("awake window [{wakeup}, {sleep}] is outside the {day}-second day")]
    InvalidAwakeWindow { wakeup: u64, sleep: u64, day: u64 },
}

/// Validate a probability vector: non-empty, non-negative, summing to one.
pub(crate) fn validate_weights(name: &'static str, weights: &[f64]) -> Result<(), ConfigError> {
    if weights.is_empty() {
        return Err(ConfigError::Empty { name });
    }
    if let Some(&bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(ConfigError::InvalidWeight { name, value: bad });
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ConfigError::WeightsDoNotSumToOne { name, sum });
    }
    Ok(())
}

/// Validate a probability in `[0, 1]`.
pub(crate) fn validate_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability {
            name,
            range: "[0, 1]",
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(validate_weights("w", &[0.5, 0.5]).is_ok());
        assert!(matches!(
            validate_weights("w", &[0.5, 0.4]),
            Err(ConfigError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        assert!(matches!(
            validate_weights("w", &[1.5, -0.5]),
            Err(ConfigError::InvalidWeight { value, .. }) if value == -0.5
        ));
    }

    #[test]
    fn test_empty_weights_rejected() {
        assert_eq!(
            validate_weights("w", &[]),
            Err(ConfigError::Empty { name: "w" })
        );
    }

    #[test]
    fn test_nan_probability_rejected() {
        assert!(validate_probability("p", f64::NAN).is_err());
        assert!(validate_probability("p", 1.0).is_ok());
    }
}
