//! Transaction amount generator
//!
//! Amounts follow a mixture of shifted gamma distributions. Each draw picks a
//! component by weight, then samples
//! `AMOUNT_SHIFT + Gamma(AMOUNT_GAMMA_SHAPE, scale)` where
//! `scale = (mean - AMOUNT_SHIFT) / AMOUNT_GAMMA_SHAPE`, so the component's
//! mean is the configured mean. The result is floored to whole cents.
//!
//! Sampling is direct (Marsaglia-Tsang in [`RngManager::gamma`]), not an
//! inverse-CDF transform. The same seed always yields the same amounts.

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_weights, ConfigError};
use crate::models::Cents;
use crate::rng::{RngManager, RngOptions};

/// Shape parameter shared by every mixture component
pub const AMOUNT_GAMMA_SHAPE: f64 = 2.0;

/// Smallest amount any component can produce, in currency units
pub const AMOUNT_SHIFT: f64 = 1.0;

/// Mixture-of-gamma amount configuration (currency units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountMixtureConfig {
    /// Mean amount of each component
    pub means: Vec<f64>,
    /// Mixture weights, parallel to `means`, summing to 1
    pub weights: Vec<f64>,
}

impl AmountMixtureConfig {
    /// Everyday spending: mostly small purchases with a long tail
    pub fn legitimate() -> Self {
        Self {
            means: vec![8.0, 35.0, 120.0, 600.0],
            weights: vec![0.45, 0.35, 0.15, 0.05],
        }
    }

    /// Fraud: fewer micro-payments, more large ticket items
    pub fn fraud() -> Self {
        Self {
            means: vec![5.0, 150.0, 900.0],
            weights: vec![0.2, 0.5, 0.3],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.means.is_empty() {
            return Err(ConfigError::Empty {
                name: "amount means",
            });
        }
        if self.means.len() != self.weights.len() {
            return Err(ConfigError::LengthMismatch {
                means: self.means.len(),
                weights: self.weights.len(),
            });
        }
        validate_weights("amount weights", &self.weights)?;
        if let Some(&mean) = self
            .means
            .iter()
            .find(|m| !m.is_finite() || **m <= AMOUNT_SHIFT)
        {
            return Err(ConfigError::InvalidParameter {
                name: "amount mean",
                reason: format!("{} must be finite and greater than {}", mean, AMOUNT_SHIFT),
            });
        }
        Ok(())
    }
}

/// Draws transaction amounts from a validated mixture
///
/// # Example
/// ```
/// use fraud_sim_core_rs::generators::{AmountGenerator, AmountMixtureConfig};
/// use fraud_sim_core_rs::rng::RngOptions;
///
/// let mut amounts =
///     AmountGenerator::new(&AmountMixtureConfig::legitimate(), RngOptions::seeded(1)).unwrap();
/// assert!(amounts.sample().get() >= 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmountGenerator {
    /// Gamma scale per component
    scales: Vec<f64>,
    weights: Vec<f64>,
    rng: RngManager,
}

impl AmountGenerator {
    pub fn new(config: &AmountMixtureConfig, options: RngOptions) -> Result<Self, ConfigError> {
        config.validate()?;
        let scales = config
            .means
            .iter()
            .map(|mean| (mean - AMOUNT_SHIFT) / AMOUNT_GAMMA_SHAPE)
            .collect();
        Ok(Self {
            scales,
            weights: config.weights.clone(),
            rng: options.resolve().rng,
        })
    }

    pub fn sample(&mut self) -> Cents {
        let component = self.rng.categorical(&self.weights);
        let units = AMOUNT_SHIFT + self.rng.gamma(AMOUNT_GAMMA_SHAPE, self.scales[component]);
        Cents::from_units_floor(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_lengths_rejected() {
        let config = AmountMixtureConfig {
            means: vec![10.0, 20.0],
            weights: vec![1.0],
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::LengthMismatch {
                means: 2,
                weights: 1
            })
        );
    }

    #[test]
    fn test_weights_not_normalized_rejected() {
        let config = AmountMixtureConfig {
            means: vec![10.0, 20.0],
            weights: vec![2.0, 2.0],
        };
        assert!(matches!(
            AmountGenerator::new(&config, RngOptions::seeded(1)),
            Err(ConfigError::WeightsDoNotSumToOne { .. })
        ));
    }

    #[test]
    fn test_mean_below_shift_rejected() {
        let config = AmountMixtureConfig {
            means: vec![0.5],
            weights: vec![1.0],
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_single_component_mean() {
        let config = AmountMixtureConfig {
            means: vec![50.0],
            weights: vec![1.0],
        };
        let mut amounts = AmountGenerator::new(&config, RngOptions::seeded(8)).unwrap();
        let n = 50_000;
        let mean = (0..n).map(|_| amounts.sample().as_units()).sum::<f64>() / n as f64;
        // Flooring to cents shaves ~0.005 on average
        assert!((mean - 50.0).abs() < 1.0, "mean {}", mean);
    }

    #[test]
    fn test_amounts_never_below_shift() {
        let mut amounts =
            AmountGenerator::new(&AmountMixtureConfig::fraud(), RngOptions::seeded(2)).unwrap();
        for _ in 0..10_000 {
            assert!(amounts.sample().get() >= 100);
        }
    }
}
