//! Tests for the per-field generators
//!
//! Statistical checks use large sample counts with tolerances several
//! standard errors wide, so they hold for any fixed seed.

use std::collections::HashSet;
use std::sync::Arc;

use fraud_sim_core_rs::generators::{
    sample_common_merchants, AmountGenerator, AmountMixtureConfig, DelayDistribution,
    DelayGenerator, EntryTypeGenerator, EntryTypeWeights, ForeignFlagGenerator, ForeignPolicy,
    MerchantSelector, MerchantTier, TierProbabilities,
};
use fraud_sim_core_rs::rng::{RngManager, RngOptions};
use fraud_sim_core_rs::{ConfigError, EntryType};

// ============================================================================
// Amounts
// ============================================================================

#[test]
fn test_amounts_are_whole_cents_above_shift() {
    let mut amounts =
        AmountGenerator::new(&AmountMixtureConfig::legitimate(), RngOptions::seeded(17)).unwrap();
    for _ in 0..10_000 {
        let amount = amounts.sample();
        assert!(amount.get() >= 100, "amount {} below 1.00", amount);
        // Display always carries exactly two decimals
        let text = amount.to_string();
        let (_, cents) = text.split_once('.').unwrap();
        assert_eq!(cents.len(), 2);
    }
}

#[test]
fn test_amount_mixture_mean_matches_config() {
    let config = AmountMixtureConfig {
        means: vec![10.0, 100.0],
        weights: vec![0.5, 0.5],
    };
    let mut amounts = AmountGenerator::new(&config, RngOptions::seeded(5)).unwrap();
    let n = 100_000;
    let total: i64 = (0..n).map(|_| amounts.sample().get()).sum();
    let mean_units = total as f64 / n as f64 / 100.0;
    // Expected 55.0, less half a cent of flooring
    assert!((mean_units - 55.0).abs() < 1.0, "mean {}", mean_units);
}

#[test]
fn test_amounts_reproducible_from_seed() {
    let config = AmountMixtureConfig::fraud();
    let mut a = AmountGenerator::new(&config, RngOptions::seeded(8)).unwrap();
    let mut b = AmountGenerator::new(&config, RngOptions::seeded(8)).unwrap();
    for _ in 0..1_000 {
        assert_eq!(a.sample(), b.sample());
    }
}

#[test]
fn test_amount_weights_must_sum_to_one() {
    let config = AmountMixtureConfig {
        means: vec![10.0, 20.0],
        weights: vec![0.5, 0.6],
    };
    assert!(matches!(
        AmountGenerator::new(&config, RngOptions::seeded(1)),
        Err(ConfigError::WeightsDoNotSumToOne { .. })
    ));
}

// ============================================================================
// Entry types and foreign flag
// ============================================================================

#[test]
fn test_entry_type_frequencies_follow_weights() {
    let weights = EntryTypeWeights::fraud();
    let mut entry_types = EntryTypeGenerator::new(&weights, RngOptions::seeded(21)).unwrap();
    let n = 100_000;
    let mut counts = [0usize; 5];
    for _ in 0..n {
        let drawn = entry_types.sample();
        let idx = EntryType::ALL.iter().position(|t| *t == drawn).unwrap();
        counts[idx] += 1;
    }
    for (count, weight) in counts.iter().zip(weights.as_array()) {
        let freq = *count as f64 / n as f64;
        assert!((freq - weight).abs() < 0.01, "freq {} vs weight {}", freq, weight);
    }
}

#[test]
fn test_zero_weight_entry_type_never_drawn() {
    let weights = EntryTypeWeights {
        contactless: 0.0,
        chip_and_pin: 0.0,
        swipe: 0.0,
        manual: 0.0,
        online: 1.0,
    };
    let mut entry_types = EntryTypeGenerator::new(&weights, RngOptions::seeded(2)).unwrap();
    for _ in 0..1_000 {
        assert_eq!(entry_types.sample(), EntryType::Online);
    }
}

#[test]
fn test_foreign_any_entry_rate() {
    let mut flags =
        ForeignFlagGenerator::new(0.3, ForeignPolicy::AnyEntry, RngOptions::seeded(4)).unwrap();
    let n = 100_000;
    let hits = (0..n).filter(|_| flags.sample(EntryType::Swipe)).count();
    let rate = hits as f64 / n as f64;
    assert!((rate - 0.3).abs() < 0.01, "rate {}", rate);
}

#[test]
fn test_foreign_probability_out_of_range_rejected() {
    assert!(matches!(
        ForeignFlagGenerator::new(1.5, ForeignPolicy::AnyEntry, RngOptions::seeded(1)),
        Err(ConfigError::InvalidProbability { .. })
    ));
}

// ============================================================================
// Merchants
// ============================================================================

fn common_pool(seed: u64) -> Arc<[u32]> {
    let mut rng = RngManager::new(seed);
    sample_common_merchants(10_000, 500, &mut rng).unwrap()
}

#[test]
fn test_common_pool_is_distinct_and_in_range() {
    let pool = common_pool(1);
    assert_eq!(pool.len(), 500);
    let unique: HashSet<u32> = pool.iter().copied().collect();
    assert_eq!(unique.len(), 500);
    assert!(pool.iter().all(|id| *id < 10_000));
}

#[test]
fn test_common_pool_larger_than_range_rejected() {
    let mut rng = RngManager::new(1);
    assert!(sample_common_merchants(10, 11, &mut rng).is_err());
}

#[test]
fn test_favorites_drawn_sixty_percent_of_the_time() {
    let pool = common_pool(3);
    let mut selector = MerchantSelector::new(
        10_000,
        pool.clone(),
        10,
        TierProbabilities::default(),
        RngOptions::seeded(77),
    )
    .unwrap();

    let favorites: HashSet<u32> = selector.favorites().iter().copied().collect();
    assert_eq!(favorites.len(), 10);
    assert!(favorites.iter().all(|id| pool.contains(id)));

    let n = 100_000;
    let mut favorite_tier = 0usize;
    let mut in_favorites = 0usize;
    for _ in 0..n {
        let (tier, merchant) = selector.sample_with_tier();
        assert!(merchant < 10_000);
        if tier == MerchantTier::Favorite {
            favorite_tier += 1;
            assert!(favorites.contains(&merchant));
        }
        if favorites.contains(&merchant) {
            in_favorites += 1;
        }
    }

    let tier_rate = favorite_tier as f64 / n as f64;
    assert!((tier_rate - 0.6).abs() < 0.02, "favorite tier rate {}", tier_rate);

    // Common and all tiers can land on a favorite too, so the overall rate
    // is slightly above the tier probability.
    let hit_rate = in_favorites as f64 / n as f64;
    assert!(hit_rate >= tier_rate);
    assert!((hit_rate - 0.6).abs() < 0.02, "favorite hit rate {}", hit_rate);
}

#[test]
fn test_uniform_selector_has_no_favorites() {
    let mut selector = MerchantSelector::uniform(1_000, RngOptions::seeded(9)).unwrap();
    assert!(selector.favorites().is_empty());
    for _ in 0..1_000 {
        let (tier, merchant) = selector.sample_with_tier();
        assert_eq!(tier, MerchantTier::All);
        assert!(merchant < 1_000);
    }
}

#[test]
fn test_too_many_favorites_rejected() {
    let pool: Arc<[u32]> = (0..5).collect();
    assert!(MerchantSelector::new(
        100,
        pool,
        6,
        TierProbabilities::default(),
        RngOptions::seeded(1)
    )
    .is_err());
}

// ============================================================================
// Delays
// ============================================================================

#[test]
fn test_geometric_delay_mean() {
    let mut delays =
        DelayGenerator::new(DelayDistribution::geometric_with_mean(100.0), RngOptions::seeded(6))
            .unwrap();
    let n = 100_000;
    let mean = (0..n).map(|_| delays.sample()).sum::<u64>() as f64 / n as f64;
    assert!((mean - 100.0).abs() < 2.0, "mean {}", mean);
}

#[test]
fn test_folded_normal_delay_never_negative_and_rounded() {
    let mut delays = DelayGenerator::new(
        DelayDistribution::FoldedNormal {
            mean: 0.0,
            std_dev: 10.0,
        },
        RngOptions::seeded(12),
    )
    .unwrap();
    let n = 50_000;
    let mean = (0..n).map(|_| delays.sample()).sum::<u64>() as f64 / n as f64;
    // E|N(0, 10)| = 10 * sqrt(2 / pi)
    assert!((mean - 7.98).abs() < 0.3, "mean {}", mean);
}

#[test]
fn test_poisson_delay_can_be_zero() {
    let mut delays =
        DelayGenerator::new(DelayDistribution::Poisson { lambda: 0.5 }, RngOptions::seeded(13))
            .unwrap();
    assert!((0..1_000).any(|_| delays.sample() == 0));
}

#[test]
fn test_invalid_geometric_p_rejected() {
    assert!(DelayGenerator::new(DelayDistribution::Geometric { p: 0.0 }, RngOptions::seeded(1)).is_err());
}
