//! Fraudulent user behavior
//!
//! Fraud arrives in episodes. Each episode waits a long folded-normal delay
//! (the eventual compromise), then emits a Poisson-sized burst (at least one
//! transaction) separated by short geometric gaps. Merchants are drawn
//! uniformly over the full range, with no favorites.

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_probability, ConfigError};
use crate::core::time::{Offset, Timestamp, SECONDS_PER_DAY};
use crate::des::{EventStream, StreamError};
use crate::generators::{
    AmountGenerator, AmountMixtureConfig, DelayDistribution, DelayGenerator, EntryTypeGenerator,
    EntryTypeWeights, ForeignFlagGenerator, ForeignPolicy, MerchantSelector,
};
use crate::models::{Label, TransactionRecord};
use crate::rng::{RngManager, RngOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudBehaviorConfig {
    /// Dormant delay before each episode's first transaction
    pub episode_delay: DelayDistribution,

    /// Mean burst size (Poisson, floored at 1)
    pub burst_size_mean: f64,

    /// Gap between transactions inside a burst
    pub burst_gap: DelayDistribution,

    pub amount: AmountMixtureConfig,

    pub entry_types: EntryTypeWeights,

    /// Probability that any fraudulent transaction is foreign
    pub foreign_probability: f64,
}

impl Default for FraudBehaviorConfig {
    fn default() -> Self {
        Self {
            episode_delay: DelayDistribution::FoldedNormal {
                mean: (45 * SECONDS_PER_DAY) as f64,
                std_dev: (20 * SECONDS_PER_DAY) as f64,
            },
            burst_size_mean: 4.0,
            burst_gap: DelayDistribution::geometric_with_mean(90.0),
            amount: AmountMixtureConfig::fraud(),
            entry_types: EntryTypeWeights::fraud(),
            foreign_probability: 0.3,
        }
    }
}

impl FraudBehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.episode_delay.validate()?;
        self.burst_gap.validate()?;
        if !self.burst_size_mean.is_finite() || self.burst_size_mean < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "burst_size_mean",
                reason: format!("{} must be finite and non-negative", self.burst_size_mean),
            });
        }
        self.amount.validate()?;
        self.entry_types.validate()?;
        validate_probability("foreign_probability", self.foreign_probability)?;
        Ok(())
    }
}

/// Transaction stream for one compromised user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudUserStream {
    user_id: u32,
    burst_size_mean: f64,
    /// Transactions left in the current burst; 0 means dormant
    remaining_in_burst: u64,
    burst_rng: RngManager,
    episode_delay: DelayGenerator,
    burst_gap: DelayGenerator,
    amount: AmountGenerator,
    entry_type: EntryTypeGenerator,
    merchant: MerchantSelector,
    foreign: ForeignFlagGenerator,
}

impl FraudUserStream {
    pub fn new(
        user_id: u32,
        config: &FraudBehaviorConfig,
        num_merchants: u32,
        options: RngOptions,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = options.resolve().rng;

        Ok(Self {
            user_id,
            burst_size_mean: config.burst_size_mean,
            remaining_in_burst: 0,
            burst_rng: rng.fork(),
            episode_delay: DelayGenerator::new(config.episode_delay, RngOptions::seeded(rng.next()))?,
            burst_gap: DelayGenerator::new(config.burst_gap, RngOptions::seeded(rng.next()))?,
            amount: AmountGenerator::new(&config.amount, RngOptions::seeded(rng.next()))?,
            entry_type: EntryTypeGenerator::new(&config.entry_types, RngOptions::seeded(rng.next()))?,
            merchant: MerchantSelector::uniform(num_merchants, RngOptions::seeded(rng.next()))?,
            foreign: ForeignFlagGenerator::new(
                config.foreign_probability,
                ForeignPolicy::AnyEntry,
                RngOptions::seeded(rng.next()),
            )?,
        })
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    /// Transactions left in the current burst.
    ///
    /// Zero means the next pull starts a new episode with a dormant delay.
    pub fn remaining_in_burst(&self) -> u64 {
        self.remaining_in_burst
    }
}

impl EventStream for FraudUserStream {
    type Payload = TransactionRecord;

    fn pull(&mut self, _now: Timestamp) -> Result<(Offset, TransactionRecord), StreamError> {
        let offset = if self.remaining_in_burst == 0 {
            self.remaining_in_burst = self.burst_rng.poisson(self.burst_size_mean).max(1);
            self.episode_delay.sample()
        } else {
            self.burst_gap.sample()
        };
        self.remaining_in_burst -= 1;

        let amount = self.amount.sample();
        let merchant_id = self.merchant.sample();
        let entry_type = self.entry_type.sample();
        let foreign = self.foreign.sample(entry_type);

        let record = TransactionRecord::new(
            Label::Fraud,
            self.user_id,
            amount,
            merchant_id,
            entry_type,
            foreign,
        );
        Ok((offset, record))
    }
}
