//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a real RNG. In tests, a seeded or scripted
//! implementation is injected so draws are reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by `rand`'s `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRngSource {
    inner: StdRng,
}

impl StdRngSource {
    /// Creates a source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeterministicRng for StdRngSource {
    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }
}
