//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use luckydraw_core::rng::DeterministicRng;

/// A no-op RNG that always returns `0.0`, so every uniform draw lands on the
/// lower bound. Suitable for tests that do not depend on specific values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that replays a predetermined sequence of unit-interval samples.
/// Panics if the sequence is exhausted. Used in tests that need specific,
/// repeatable draws.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given samples.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    /// Create a `SequenceRng` whose samples map to `targets` when drawn
    /// uniformly over `[lower, upper]`.
    #[must_use]
    pub fn yielding(lower: i64, upper: i64, targets: &[i64]) -> Self {
        Self::new(
            targets
                .iter()
                .map(|&t| unit_for(lower, upper, t))
                .collect(),
        )
    }
}

impl DeterministicRng for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}

/// Returns the sample in `[0, 1)` that a uniform draw over `[lower, upper]`
/// maps to `target`. The sample sits in the middle of `target`'s bucket.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn unit_for(lower: i64, upper: i64, target: i64) -> f64 {
    let span = (upper - lower + 1) as f64;
    ((target - lower) as f64 + 0.5) / span
}
