//! Seed resolution for stochastic generators
//!
//! Every generator constructor takes an [`RngOptions`] and resolves it once.
//! Resolution order:
//! 1. an RNG instance supplied by the caller is used as-is
//! 2. otherwise an explicit seed builds a fresh RNG
//! 3. otherwise a seed is derived from the wall clock (not reproducible)

use std::time::{SystemTime, UNIX_EPOCH};

use super::RngManager;

/// Where a resolved generator's RNG came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedProvenance {
    /// Caller handed over an already-constructed RNG
    Supplied,
    /// Built from an explicit seed
    Explicit(u64),
    /// Built from a wall-clock seed; runs cannot be reproduced
    TimeDerived(u64),
}

/// Seeding options accepted by every stochastic constructor
///
/// # Example
/// ```
/// use fraud_sim_core_rs::rng::{RngOptions, SeedProvenance};
///
/// let resolved = RngOptions::seeded(42).resolve();
/// assert_eq!(resolved.provenance, SeedProvenance::Explicit(42));
/// assert!(resolved.is_reproducible());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RngOptions {
    /// Explicit seed for reproducible construction
    pub seed: Option<u64>,
    /// RNG to reuse directly; takes precedence over `seed`
    pub rng: Option<RngManager>,
}

impl RngOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: None,
        }
    }

    pub fn with_rng(rng: RngManager) -> Self {
        Self {
            seed: None,
            rng: Some(rng),
        }
    }

    /// No seed and no RNG: resolves from the wall clock
    pub fn unseeded() -> Self {
        Self::default()
    }

    pub fn resolve(self) -> ResolvedRng {
        if let Some(rng) = self.rng {
            return ResolvedRng {
                rng,
                provenance: SeedProvenance::Supplied,
            };
        }
        if let Some(seed) = self.seed {
            return ResolvedRng {
                rng: RngManager::new(seed),
                provenance: SeedProvenance::Explicit(seed),
            };
        }

        let seed = time_derived_seed();
        tracing::warn!(seed, "no seed supplied, using a time-derived seed; output is not reproducible");
        ResolvedRng {
            rng: RngManager::new(seed),
            provenance: SeedProvenance::TimeDerived(seed),
        }
    }
}

impl From<u64> for RngOptions {
    fn from(seed: u64) -> Self {
        Self::seeded(seed)
    }
}

impl From<Option<u64>> for RngOptions {
    fn from(seed: Option<u64>) -> Self {
        Self { seed, rng: None }
    }
}

impl From<RngManager> for RngOptions {
    fn from(rng: RngManager) -> Self {
        Self::with_rng(rng)
    }
}

/// Outcome of [`RngOptions::resolve`]
#[derive(Debug, Clone)]
pub struct ResolvedRng {
    pub rng: RngManager,
    pub provenance: SeedProvenance,
}

impl ResolvedRng {
    pub fn is_reproducible(&self) -> bool {
        !matches!(self.provenance, SeedProvenance::TimeDerived(_))
    }
}

fn time_derived_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    // Fold the 128-bit count so both halves contribute.
    (nanos as u64) ^ ((nanos >> 64) as u64)
}
