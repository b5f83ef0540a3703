//! Foreign-transaction flag
//!
//! Legitimate users can only be foreign when paying online; fraudsters can
//! be foreign on any entry type.

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_probability, ConfigError};
use crate::models::EntryType;
use crate::rng::{RngManager, RngOptions};

/// Which entry types may be flagged foreign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForeignPolicy {
    OnlineOnly,
    AnyEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignFlagGenerator {
    probability: f64,
    policy: ForeignPolicy,
    rng: RngManager,
}

impl ForeignFlagGenerator {
    pub fn new(
        probability: f64,
        policy: ForeignPolicy,
        options: RngOptions,
    ) -> Result<Self, ConfigError> {
        validate_probability("foreign_probability", probability)?;
        Ok(Self {
            probability,
            policy,
            rng: options.resolve().rng,
        })
    }

    /// Flag for a transaction with the given entry type.
    ///
    /// Entry types excluded by the policy consume no randomness.
    pub fn sample(&mut self, entry_type: EntryType) -> bool {
        if self.policy == ForeignPolicy::OnlineOnly && entry_type != EntryType::Online {
            return false;
        }
        self.rng.chance(self.probability)
    }
}
