//! Legitimate user behavior
//!
//! A legitimate user transacts at geometric intervals, but only while awake.
//! The user's local time is `(absolute + tz_offset) mod 86400` with the
//! timezone offset fixed at `user_id mod 24` hours. When a candidate event
//! would land outside the awake window, further geometric delays are added
//! until it lands inside again.
//!
//! The skip loop is bounded by `max_sleep_retries`. A configuration that can
//! never land inside the window (for example a zero-width window with a
//! coarse delay distribution) fails the stream instead of spinning.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_probability, ConfigError};
use crate::core::time::{timezone_offset, AwakeWindow, Offset, Timestamp, SECONDS_PER_HOUR};
use crate::des::{EventStream, StreamError};
use crate::generators::{
    AmountGenerator, AmountMixtureConfig, DelayDistribution, DelayGenerator, EntryTypeGenerator,
    EntryTypeWeights, ForeignFlagGenerator, ForeignPolicy, MerchantSelector, TierProbabilities,
};
use crate::models::{Label, TransactionRecord};
use crate::rng::RngOptions;

/// Behavior parameters shared by every legitimate user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegitimateBehaviorConfig {
    /// Delay between consecutive transactions (before sleep skipping)
    pub delay: DelayDistribution,

    /// Local hours during which the user transacts
    pub awake_window: AwakeWindow,

    pub amount: AmountMixtureConfig,

    pub entry_types: EntryTypeWeights,

    pub merchant_tiers: TierProbabilities,

    /// Size of each user's favorite-merchant set (drawn from the common pool)
    pub favorites_per_user: usize,

    /// Probability that an online transaction is foreign
    pub foreign_probability: f64,

    /// Maximum extra delay draws while skipping sleeping hours
    pub max_sleep_retries: u32,
}

impl Default for LegitimateBehaviorConfig {
    fn default() -> Self {
        Self {
            delay: DelayDistribution::geometric_with_mean((3 * SECONDS_PER_HOUR) as f64),
            awake_window: AwakeWindow::default(),
            amount: AmountMixtureConfig::legitimate(),
            entry_types: EntryTypeWeights::legitimate(),
            merchant_tiers: TierProbabilities::default(),
            favorites_per_user: 10,
            foreign_probability: 0.05,
            max_sleep_retries: 100_000,
        }
    }
}

impl LegitimateBehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delay.validate()?;
        self.awake_window.validate()?;
        self.amount.validate()?;
        self.entry_types.validate()?;
        self.merchant_tiers.validate()?;
        validate_probability("foreign_probability", self.foreign_probability)?;
        if self.max_sleep_retries == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_sleep_retries",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Transaction stream for one legitimate user
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use fraud_sim_core_rs::des::EventStream;
/// use fraud_sim_core_rs::rng::RngOptions;
/// use fraud_sim_core_rs::streams::{LegitimateBehaviorConfig, LegitimateUserStream};
///
/// let common: Arc<[u32]> = (0..100).collect();
/// let mut user = LegitimateUserStream::new(
///     7,
///     &LegitimateBehaviorConfig::default(),
///     1_000,
///     common,
///     RngOptions::seeded(42),
/// )
/// .unwrap();
///
/// let (offset, tx) = user.pull(0).unwrap();
/// assert!(offset >= 1);
/// assert_eq!(tx.user_id(), 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegitimateUserStream {
    user_id: u32,
    tz_offset: Offset,
    window: AwakeWindow,
    max_sleep_retries: u32,
    delay: DelayGenerator,
    amount: AmountGenerator,
    entry_type: EntryTypeGenerator,
    merchant: MerchantSelector,
    foreign: ForeignFlagGenerator,
}

impl LegitimateUserStream {
    pub fn new(
        user_id: u32,
        config: &LegitimateBehaviorConfig,
        num_merchants: u32,
        common_merchants: Arc<[u32]>,
        options: RngOptions,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = options.resolve().rng;

        Ok(Self {
            user_id,
            tz_offset: timezone_offset(user_id),
            window: config.awake_window,
            max_sleep_retries: config.max_sleep_retries,
            delay: DelayGenerator::new(config.delay, RngOptions::seeded(rng.next()))?,
            amount: AmountGenerator::new(&config.amount, RngOptions::seeded(rng.next()))?,
            entry_type: EntryTypeGenerator::new(&config.entry_types, RngOptions::seeded(rng.next()))?,
            merchant: MerchantSelector::new(
                num_merchants,
                common_merchants,
                config.favorites_per_user,
                config.merchant_tiers,
                RngOptions::seeded(rng.next()),
            )?,
            foreign: ForeignFlagGenerator::new(
                config.foreign_probability,
                ForeignPolicy::OnlineOnly,
                RngOptions::seeded(rng.next()),
            )?,
        })
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    pub fn tz_offset(&self) -> Offset {
        self.tz_offset
    }

    pub fn window(&self) -> AwakeWindow {
        self.window
    }

    pub fn favorite_merchants(&self) -> &[u32] {
        self.merchant.favorites()
    }

    /// Delay from `now` to the next awake instant reached by geometric draws
    fn next_awake_offset(&mut self, now: Timestamp) -> Result<Offset, StreamError> {
        let mut offset = self.delay.sample();
        let mut retries = 0;
        while !self
            .window
            .is_awake_at(now.saturating_add(offset), self.tz_offset)
        {
            if retries >= self.max_sleep_retries {
                return Err(StreamError::Failed {
                    reason: format!(
                        "user {} found no awake time after {} delay draws",
                        self.user_id, retries
                    ),
                });
            }
            offset = offset.saturating_add(self.delay.sample());
            retries += 1;
        }
        Ok(offset)
    }
}

impl EventStream for LegitimateUserStream {
    type Payload = TransactionRecord;

    fn pull(&mut self, now: Timestamp) -> Result<(Offset, TransactionRecord), StreamError> {
        let offset = self.next_awake_offset(now)?;

        let amount = self.amount.sample();
        let merchant_id = self.merchant.sample();
        let entry_type = self.entry_type.sample();
        let foreign = self.foreign.sample(entry_type);

        let record = TransactionRecord::new(
            Label::Legitimate,
            self.user_id,
            amount,
            merchant_id,
            entry_type,
            foreign,
        );
        Ok((offset, record))
    }
}
