//! Seeded Randomness
//!
//! `SimRng` wraps the single `SmallRng` behind every stochastic decision in
//! a run: placement, hardship and risk draws, activation-order shuffles,
//! uniform tie-breaks, and jail terms. Threading one generator through
//! setup and every tick gives a strict, reproducible draw order, so a run
//! is fully determined by its seed.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The simulation's only random source.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    /// Creates a generator from the configured seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw from the closed interval [min, max].
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        self.0.gen_range(min..=max)
    }

    /// Uniform index into a collection of `len` elements. `len` must be
    /// nonzero; callers check for empty candidate sets first.
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Jail term drawn uniformly from [1, max_term], never zero.
    pub fn jail_term(&mut self, max_term: u32) -> u32 {
        self.0.gen_range(1..=max_term)
    }

    /// Shuffles a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
