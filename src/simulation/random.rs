//! Uniform randomness for the transition function.
//!
//! Every probabilistic decision goes through [`RandomSource`]. The concrete
//! generator is [`WorkerRng`]; the population manager hands one instance to
//! each parallel chunk, so no generator is shared between threads.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::states::Rgba;

pub trait RandomSource {
    /// Uniform real in [0, 1)
    fn uniform01(&mut self) -> f64;

    /// Opaque colour with independently uniform channels
    fn uniform_color(&mut self) -> Rgba;

    /// Uniform real in [lo, hi)
    fn uniform_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.uniform01()
    }
}

/// ChaCha8-backed generator, one per worker
#[derive(Debug, Clone)]
pub struct WorkerRng {
    inner: ChaCha8Rng,
}

impl WorkerRng {
    pub fn from_entropy() -> Self {
        Self { inner: ChaCha8Rng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seed for an independent child generator
    pub fn next_seed(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl RandomSource for WorkerRng {
    fn uniform01(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn uniform_color(&mut self) -> Rgba {
        Rgba::opaque(self.inner.gen(), self.inner.gen(), self.inner.gen())
    }
}
