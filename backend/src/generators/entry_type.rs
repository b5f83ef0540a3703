//! Entry-type generator
//!
//! Weighted categorical draw over the five card-presentation types.
//! Legitimate users skew towards contactless and online; fraudsters towards
//! manual entry and online.

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_weights, ConfigError};
use crate::models::EntryType;
use crate::rng::{RngManager, RngOptions};

/// Per-type selection weights, summing to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryTypeWeights {
    pub contactless: f64,
    pub chip_and_pin: f64,
    pub swipe: f64,
    pub manual: f64,
    pub online: f64,
}

impl EntryTypeWeights {
    pub fn legitimate() -> Self {
        Self {
            contactless: 0.35,
            chip_and_pin: 0.20,
            swipe: 0.05,
            manual: 0.02,
            online: 0.38,
        }
    }

    pub fn fraud() -> Self {
        Self {
            contactless: 0.05,
            chip_and_pin: 0.05,
            swipe: 0.10,
            manual: 0.40,
            online: 0.40,
        }
    }

    /// Weights in [`EntryType::ALL`] order
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.contactless,
            self.chip_and_pin,
            self.swipe,
            self.manual,
            self.online,
        ]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_weights("entry type weights", &self.as_array())
    }
}

/// Draws entry types from validated weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTypeGenerator {
    weights: [f64; 5],
    rng: RngManager,
}

impl EntryTypeGenerator {
    pub fn new(weights: &EntryTypeWeights, options: RngOptions) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self {
            weights: weights.as_array(),
            rng: options.resolve().rng,
        })
    }

    pub fn sample(&mut self) -> EntryType {
        EntryType::ALL[self.rng.categorical(&self.weights)]
    }
}
