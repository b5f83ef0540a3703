//! Inter-event delay generator
//!
//! Delays are whole seconds of virtual time. The folded normal is rounded to
//! the nearest second; geometric delays are always at least one second.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::time::Offset;
use crate::rng::{RngManager, RngOptions};

/// Delay distribution, tagged by `type` in configuration files
///
/// ```
/// use fraud_sim_core_rs::generators::DelayDistribution;
///
/// let json = r#"{"type": "Geometric", "p": 0.001}"#;
/// let delay: DelayDistribution = serde_json::from_str(json).unwrap();
/// assert_eq!(delay, DelayDistribution::Geometric { p: 0.001 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DelayDistribution {
    /// Trials until first success, success probability `p` per second
    Geometric { p: f64 },

    /// Poisson with mean `lambda` seconds (may be zero)
    Poisson { lambda: f64 },

    /// `|N(mean, std_dev)|` seconds
    FoldedNormal { mean: f64, std_dev: f64 },
}

impl DelayDistribution {
    /// Geometric delay with the given mean in seconds (`mean >= 1`)
    pub fn geometric_with_mean(mean_secs: f64) -> Self {
        DelayDistribution::Geometric { p: 1.0 / mean_secs }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            DelayDistribution::Geometric { p } => {
                if !(p > 0.0 && p <= 1.0) {
                    return Err(ConfigError::InvalidProbability {
                        name: "geometric p",
                        range: "(0, 1]",
                        value: p,
                    });
                }
            }
            DelayDistribution::Poisson { lambda } => {
                if !lambda.is_finite() || lambda < 0.0 {
                    return Err(ConfigError::InvalidParameter {
                        name: "poisson lambda",
                        reason: format!("{} must be finite and non-negative", lambda),
                    });
                }
            }
            DelayDistribution::FoldedNormal { mean, std_dev } => {
                if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(ConfigError::InvalidParameter {
                        name: "folded normal",
                        reason: format!(
                            "mean {} and std_dev {} must be finite, std_dev non-negative",
                            mean, std_dev
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Draws delays from a validated distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayGenerator {
    distribution: DelayDistribution,
    rng: RngManager,
}

impl DelayGenerator {
    pub fn new(distribution: DelayDistribution, options: RngOptions) -> Result<Self, ConfigError> {
        distribution.validate()?;
        Ok(Self {
            distribution,
            rng: options.resolve().rng,
        })
    }

    pub fn distribution(&self) -> &DelayDistribution {
        &self.distribution
    }

    pub fn sample(&mut self) -> Offset {
        match self.distribution {
            DelayDistribution::Geometric { p } => self.rng.geometric(p),
            DelayDistribution::Poisson { lambda } => self.rng.poisson(lambda),
            DelayDistribution::FoldedNormal { mean, std_dev } => {
                let x = mean + std_dev * self.rng.standard_normal();
                x.abs().round() as Offset
            }
        }
    }
}
