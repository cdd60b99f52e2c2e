//! Random integer sequence generation.

use std::collections::HashSet;

use luckydraw_core::rng::DeterministicRng;

use super::range_spec::{RangeSpec, slots_between};

/// Draws one integer uniformly from `[lower, upper]` inclusive as
/// `lower + floor(U * (upper - lower + 1))`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn uniform_int(lower: i64, upper: i64, rng: &mut dyn DeterministicRng) -> i64 {
    let (lower, upper) = (lower.min(upper), lower.max(upper));
    let span = slots_between(lower, upper);
    // f64 rounding can land exactly on `span` for samples close to 1.0.
    let offset = ((rng.next_f64() * span as f64).floor() as u64).min(span - 1);
    i64::try_from(i128::from(lower) + i128::from(offset)).unwrap_or(upper)
}

/// Generates `count` integers in `[lower, upper]`.
///
/// Without `unique`, values are independent and may repeat. With `unique`,
/// values are distinct, collected by rejection sampling in draw order. A
/// unique request larger than the range is cut down to the range size so the
/// loop always terminates; `count == 0` yields an empty sequence.
pub fn generate(
    lower: i64,
    upper: i64,
    count: usize,
    unique: bool,
    rng: &mut dyn DeterministicRng,
) -> Vec<i64> {
    if !unique {
        return (0..count).map(|_| uniform_int(lower, upper, rng)).collect();
    }

    let slots = usize::try_from(slots_between(lower.min(upper), lower.max(upper)))
        .unwrap_or(usize::MAX);
    let target = count.min(slots);

    let mut seen = HashSet::with_capacity(target);
    let mut values = Vec::with_capacity(target);
    while values.len() < target {
        let candidate = uniform_int(lower, upper, rng);
        if seen.insert(candidate) {
            values.push(candidate);
        }
    }
    values
}

/// Generates the sequence a validated spec asks for.
pub fn generate_for(spec: &RangeSpec, rng: &mut dyn DeterministicRng) -> Vec<i64> {
    generate(
        spec.lower(),
        spec.upper(),
        spec.count() as usize,
        spec.unique(),
        rng,
    )
}

/// Generates a throwaway display frame for the reveal animation. Teasers
/// ignore uniqueness.
pub fn teaser_for(spec: &RangeSpec, rng: &mut dyn DeterministicRng) -> Vec<i64> {
    generate(
        spec.lower(),
        spec.upper(),
        spec.count() as usize,
        false,
        rng,
    )
}
