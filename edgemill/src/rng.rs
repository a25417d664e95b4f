//! Seeded random source threaded through every sampling component.
//!
//! Determinism is the core contract of this crate: the same seed must
//! produce the same dataset, field for field. [`SeededRng`] is an owned
//! handle around `ChaCha8Rng` that every component borrows mutably, so the
//! consumption schedule is exactly the order in which components run —
//! never a process-wide singleton, never thread-local state.
//!
//! The distribution helpers exist so callers sample in one call without
//! re-stating constructor error handling at every draw site; all
//! distribution parameters in this crate are compile-time constants or
//! values already validated by construction.

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution, LogNormal, Normal, Poisson};

/// Owned deterministic random source.
///
/// Cheap to construct, impossible to share: components receive
/// `&mut SeededRng` and draws interleave in call order. Reordering any two
/// draw sites is an observable (dataset-changing) modification.
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Create a random source from an integer seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Choose one element uniformly from a non-empty slice.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty. Empty dimension catalogs are a documented
    /// precondition violation, not a recoverable error.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "cannot choose from an empty catalog");
        let idx = self.inner.random_range(0..items.len());
        &items[idx]
    }

    /// Draw `amount` distinct indices in `0..length` without replacement.
    ///
    /// # Panics
    ///
    /// Panics if `amount > length`; callers clamp first.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.inner, length, amount).into_vec()
    }

    /// Poisson draw with the given rate, truncated to an integer count.
    ///
    /// A non-positive rate yields zero without consuming a draw; with the
    /// shipped lookup tables every arrival rate is strictly positive.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        let dist = Poisson::new(lambda).expect("poisson rate is positive and finite");
        dist.sample(&mut self.inner) as u64
    }

    /// Binomial draw over `n` trials with per-trial probability `p`.
    pub fn binomial(&mut self, n: u64, p: f64) -> u64 {
        let dist = Binomial::new(n, p).expect("binomial probability is within [0, 1]");
        dist.sample(&mut self.inner)
    }

    /// Normal draw with the given mean and standard deviation.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let dist = Normal::new(mean, std_dev).expect("normal std dev is non-negative and finite");
        dist.sample(&mut self.inner)
    }

    /// Log-normal draw parameterized by the underlying normal's mean and
    /// standard deviation.
    pub fn log_normal(&mut self, mu: f64, sigma: f64) -> f64 {
        let dist = LogNormal::new(mu, sigma).expect("log-normal sigma is non-negative and finite");
        dist.sample(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.poisson(120.0), b.poisson(120.0));
            assert_eq!(a.normal(2.2, 0.25), b.normal(2.2, 0.25));
            assert_eq!(a.binomial(1000, 0.01), b.binomial(1000, 0.01));
            assert_eq!(a.log_normal(4.8, 0.25), b.log_normal(4.8, 0.25));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededRng::new(1);
        let mut b = SeededRng::new(2);
        let draws_a: Vec<u64> = (0..16).map(|_| a.poisson(500.0)).collect();
        let draws_b: Vec<u64> = (0..16).map(|_| b.poisson(500.0)).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn non_positive_poisson_rate_is_zero_and_free() {
        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        assert_eq!(a.poisson(0.0), 0);
        assert_eq!(a.poisson(-3.0), 0);
        // The zero-rate path must not advance the stream.
        assert_eq!(a.poisson(50.0), b.poisson(50.0));
    }

    #[test]
    fn sample_indices_are_distinct_and_in_range() {
        let mut rng = SeededRng::new(99);
        let idxs = rng.sample_indices(5000, 500);
        assert_eq!(idxs.len(), 500);
        let mut seen = idxs.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 500);
        assert!(idxs.iter().all(|&i| i < 5000));
    }

    #[test]
    fn binomial_zero_trials_is_zero() {
        let mut rng = SeededRng::new(5);
        assert_eq!(rng.binomial(0, 0.25), 0);
    }

    #[test]
    #[should_panic(expected = "empty catalog")]
    fn choice_panics_on_empty() {
        let mut rng = SeededRng::new(1);
        let empty: Vec<String> = Vec::new();
        rng.choice(&empty);
    }
}
