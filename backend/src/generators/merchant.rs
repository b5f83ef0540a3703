//! Merchant selection
//!
//! Three-tier biased sampling: each draw first picks a tier (the user's
//! favorites, the shared common pool, or the full merchant range), then a
//! merchant uniformly from that tier. Favorites are a fixed-size subset of
//! the common pool chosen when the selector is built.
//!
//! The common pool is computed once per population and shared read-only
//! between selectors.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::{validate_weights, ConfigError};
use crate::rng::{RngManager, RngOptions};

/// Probability of drawing from each tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierProbabilities {
    pub favorite: f64,
    pub common: f64,
    pub all: f64,
}

impl TierProbabilities {
    /// Every draw is uniform over the full merchant range
    pub fn uniform() -> Self {
        Self {
            favorite: 0.0,
            common: 0.0,
            all: 1.0,
        }
    }

    fn as_array(&self) -> [f64; 3] {
        [self.favorite, self.common, self.all]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_weights("merchant tier probabilities", &self.as_array())
    }
}

impl Default for TierProbabilities {
    fn default() -> Self {
        Self {
            favorite: 0.6,
            common: 0.37,
            all: 0.03,
        }
    }
}

/// Tier a merchant was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MerchantTier {
    Favorite,
    Common,
    All,
}

/// Choose `count` distinct ids from `0..num_merchants` (Floyd's algorithm).
///
/// Returned sorted.
///
/// # Example
/// ```
/// use fraud_sim_core_rs::generators::sample_common_merchants;
/// use fraud_sim_core_rs::RngManager;
///
/// let mut rng = RngManager::new(1);
/// let common = sample_common_merchants(1_000, 50, &mut rng).unwrap();
/// assert_eq!(common.len(), 50);
/// ```
pub fn sample_common_merchants(
    num_merchants: u32,
    count: u32,
    rng: &mut RngManager,
) -> Result<Arc<[u32]>, ConfigError> {
    if count > num_merchants {
        return Err(ConfigError::InvalidParameter {
            name: "num_common_merchants",
            reason: format!("{} exceeds num_merchants {}", count, num_merchants),
        });
    }
    let chosen = sample_distinct(u64::from(num_merchants), u64::from(count), rng);
    Ok(chosen.into_iter().map(|id| id as u32).collect())
}

fn sample_distinct(n: u64, k: u64, rng: &mut RngManager) -> BTreeSet<u64> {
    let mut chosen = BTreeSet::new();
    for j in (n - k)..n {
        let t = rng.range(0, j as i64 + 1) as u64;
        if !chosen.insert(t) {
            chosen.insert(j);
        }
    }
    chosen
}

/// Per-user merchant selector
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use fraud_sim_core_rs::generators::{MerchantSelector, TierProbabilities};
/// use fraud_sim_core_rs::rng::RngOptions;
///
/// let common: Arc<[u32]> = (0..100).collect();
/// let mut selector = MerchantSelector::new(
///     10_000,
///     common,
///     5,
///     TierProbabilities::default(),
///     RngOptions::seeded(3),
/// )
/// .unwrap();
/// assert!(selector.sample() < 10_000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantSelector {
    num_merchants: u32,
    common: Arc<[u32]>,
    favorites: Vec<u32>,
    tiers: TierProbabilities,
    rng: RngManager,
}

impl MerchantSelector {
    pub fn new(
        num_merchants: u32,
        common: Arc<[u32]>,
        favorites_per_user: usize,
        tiers: TierProbabilities,
        options: RngOptions,
    ) -> Result<Self, ConfigError> {
        tiers.validate()?;
        if num_merchants == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "num_merchants",
                reason: "must be positive".to_string(),
            });
        }
        if let Some(&bad) = common.iter().find(|id| **id >= num_merchants) {
            return Err(ConfigError::InvalidParameter {
                name: "common merchants",
                reason: format!("id {} outside 0..{}", bad, num_merchants),
            });
        }
        if tiers.common > 0.0 && common.is_empty() {
            return Err(ConfigError::Empty {
                name: "common merchants",
            });
        }
        if tiers.favorite > 0.0 && (favorites_per_user == 0 || favorites_per_user > common.len()) {
            return Err(ConfigError::InvalidParameter {
                name: "favorites_per_user",
                reason: format!(
                    "must be in 1..={} when favorites are drawn (got {})",
                    common.len(),
                    favorites_per_user
                ),
            });
        }

        let mut rng = options.resolve().rng;
        let favorites = if tiers.favorite > 0.0 {
            sample_distinct(common.len() as u64, favorites_per_user as u64, &mut rng)
                .into_iter()
                .map(|idx| common[idx as usize])
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            num_merchants,
            common,
            favorites,
            tiers,
            rng,
        })
    }

    /// Selector drawing uniformly over the whole merchant range
    pub fn uniform(num_merchants: u32, options: RngOptions) -> Result<Self, ConfigError> {
        Self::new(
            num_merchants,
            Arc::from(Vec::new()),
            0,
            TierProbabilities::uniform(),
            options,
        )
    }

    pub fn favorites(&self) -> &[u32] {
        &self.favorites
    }

    pub fn sample(&mut self) -> u32 {
        self.sample_with_tier().1
    }

    /// Draw a merchant and report which tier it came from
    pub fn sample_with_tier(&mut self) -> (MerchantTier, u32) {
        let tier = match self.rng.categorical(&self.tiers.as_array()) {
            0 => MerchantTier::Favorite,
            1 => MerchantTier::Common,
            _ => MerchantTier::All,
        };
        let merchant = match tier {
            MerchantTier::Favorite => pick(&self.favorites, &mut self.rng),
            MerchantTier::Common => pick(&self.common, &mut self.rng),
            MerchantTier::All => None,
        };
        match merchant {
            Some(id) => (tier, id),
            None => (
                MerchantTier::All,
                self.rng.range(0, i64::from(self.num_merchants)) as u32,
            ),
        }
    }
}

fn pick(pool: &[u32], rng: &mut RngManager) -> Option<u32> {
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.range(0, pool.len() as i64) as usize])
}
