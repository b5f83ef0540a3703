//! xorshift64* random number generator
//!
//! This is a fast, high-quality PRNG that is deterministic and suitable
//! for simulation purposes.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Sampling
//!
//! Every distribution the generators need is sampled here from uniform
//! draws, so the exact sequence depends only on this file:
//! - normal: Box-Muller (cosine branch only)
//! - gamma: Marsaglia-Tsang, with the `u^(1/k)` boost for shape < 1
//! - Poisson: Knuth multiplication below λ = 30, rounded normal above
//! - geometric: inverse CDF, support `{1, 2, ...}`
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers.

use serde::{Deserialize, Serialize};

/// Above this mean the Poisson sampler switches to a normal approximation.
const POISSON_KNUTH_LIMIT: f64 = 30.0;

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use fraud_sim_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let range_value = rng.range(0, 100); // [0, 100)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is remapped to 1 (xorshift cannot leave the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate random value in range [min, max)
    ///
    /// # Panics
    /// Panics if min >= max
    ///
    /// # Example
    /// ```
    /// use fraud_sim_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let merchant = rng.range(0, 10_000);
    /// assert!((0..10_000).contains(&merchant));
    /// ```
    pub fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = max.abs_diff(min);
        min.wrapping_add((value % range_size) as i64)
    }

    /// Get current RNG state (for checkpointing/replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Bernoulli trial: true with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Derive an independent child generator seeded from this one.
    ///
    /// Sub-generators must be forked rather than share a parent's state.
    pub fn fork(&mut self) -> RngManager {
        RngManager::new(self.next())
    }

    /// Standard normal draw (Box-Muller)
    pub fn standard_normal(&mut self) -> f64 {
        // 1 - u keeps the logarithm's argument in (0, 1]
        let u1 = 1.0 - self.next_f64();
        let u2 = self.next_f64();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Gamma draw with the given shape `k > 0` and scale `θ > 0`
    ///
    /// # Example
    /// ```
    /// use fraud_sim_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(7);
    /// let x = rng.gamma(2.0, 10.0);
    /// assert!(x >= 0.0);
    /// ```
    pub fn gamma(&mut self, shape: f64, scale: f64) -> f64 {
        if shape < 1.0 {
            let u = self.next_f64();
            return self.gamma(shape + 1.0, scale) * u.powf(1.0 / shape);
        }

        let d = shape - 1.0 / 3.0;
        let c = 1.0 / (9.0 * d).sqrt();
        loop {
            let (x, v) = loop {
                let x = self.standard_normal();
                let v = 1.0 + c * x;
                if v > 0.0 {
                    break (x, v * v * v);
                }
            };
            let u = self.next_f64();
            let x2 = x * x;
            if u < 1.0 - 0.0331 * x2 * x2 || u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
                return d * v * scale;
            }
        }
    }

    /// Poisson draw with mean `lambda` (non-positive means return 0)
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        if lambda >= POISSON_KNUTH_LIMIT {
            let approx = lambda + lambda.sqrt() * self.standard_normal();
            return approx.round().max(0.0) as u64;
        }

        let limit = (-lambda).exp();
        let mut k = 0u64;
        let mut p = 1.0;
        loop {
            p *= self.next_f64();
            if p <= limit {
                return k;
            }
            k += 1;
        }
    }

    /// Geometric draw: number of Bernoulli(`p`) trials up to and including
    /// the first success, so the result is always at least 1.
    pub fn geometric(&mut self, p: f64) -> u64 {
        if p >= 1.0 {
            return 1;
        }
        let u = self.next_f64();
        let trials = ((1.0 - u).ln() / (1.0 - p).ln()).ceil();
        // Float-to-int casts saturate, so huge draws clamp to u64::MAX.
        (trials as u64).max(1)
    }

    /// Index drawn with probability proportional to `weights`
    ///
    /// # Panics
    /// Panics if `weights` is empty
    pub fn categorical(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must not be empty");

        let total: f64 = weights.iter().sum();
        let target = self.next_f64() * total;
        let mut cumulative = 0.0;
        for (idx, weight) in weights.iter().enumerate() {
            cumulative += weight;
            if target < cumulative {
                return idx;
            }
        }
        // Rounding can leave target == total; fall back to the last
        // index that carries weight.
        weights
            .iter()
            .rposition(|w| *w > 0.0)
            .unwrap_or(weights.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(100, 50);
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_geometric_support_starts_at_one() {
        let mut rng = RngManager::new(3);
        for _ in 0..10_000 {
            assert!(rng.geometric(0.5) >= 1);
        }
        assert_eq!(rng.geometric(1.0), 1);
    }

    #[test]
    fn test_geometric_mean() {
        let mut rng = RngManager::new(11);
        let n = 50_000;
        let mean = (0..n).map(|_| rng.geometric(0.1) as f64).sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.3, "geometric mean {}", mean);
    }

    #[test]
    fn test_poisson_mean_small_and_large() {
        let mut rng = RngManager::new(5);
        let n = 50_000;
        let small = (0..n).map(|_| rng.poisson(3.0) as f64).sum::<f64>() / n as f64;
        let large = (0..n).map(|_| rng.poisson(100.0) as f64).sum::<f64>() / n as f64;
        assert!((small - 3.0).abs() < 0.05, "poisson(3) mean {}", small);
        assert!((large - 100.0).abs() < 0.5, "poisson(100) mean {}", large);
        assert_eq!(rng.poisson(0.0), 0);
    }

    #[test]
    fn test_gamma_mean() {
        let mut rng = RngManager::new(17);
        let n = 50_000;
        let mean = (0..n).map(|_| rng.gamma(2.0, 5.0)).sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.2, "gamma(2, 5) mean {}", mean);

        let small_shape = (0..n).map(|_| rng.gamma(0.5, 2.0)).sum::<f64>() / n as f64;
        assert!((small_shape - 1.0).abs() < 0.05, "gamma(0.5, 2) mean {}", small_shape);
    }

    #[test]
    fn test_categorical_respects_zero_weights() {
        let mut rng = RngManager::new(23);
        for _ in 0..1000 {
            let idx = rng.categorical(&[0.0, 1.0, 0.0]);
            assert_eq!(idx, 1);
        }
    }

    #[test]
    fn test_fork_is_independent_of_later_parent_draws() {
        let mut parent1 = RngManager::new(99);
        let mut parent2 = RngManager::new(99);

        let mut child1 = parent1.fork();
        let mut child2 = parent2.fork();
        parent2.next();

        assert_eq!(child1.next(), child2.next());
    }
}
