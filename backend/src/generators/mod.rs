//! Stochastic field generators
//!
//! Each generator owns its RNG exclusively and produces one domain value per
//! call, forever. Construction validates configuration and fails fast with a
//! [`ConfigError`](crate::core::ConfigError).
//!
//! - **amount**: mixture-of-gamma transaction amounts
//! - **entry_type**: weighted card-presentation type
//! - **merchant**: favorite / common / all tiered merchant selection
//! - **foreign**: foreign-transaction flag
//! - **delay**: inter-event delays (geometric, Poisson, folded normal)

pub mod amount;
pub mod delay;
pub mod entry_type;
pub mod foreign;
pub mod merchant;

pub use amount::{AmountGenerator, AmountMixtureConfig, AMOUNT_GAMMA_SHAPE, AMOUNT_SHIFT};
pub use delay::{DelayDistribution, DelayGenerator};
pub use entry_type::{EntryTypeGenerator, EntryTypeWeights};
pub use foreign::{ForeignFlagGenerator, ForeignPolicy};
pub use merchant::{sample_common_merchants, MerchantSelector, MerchantTier, TierProbabilities};
