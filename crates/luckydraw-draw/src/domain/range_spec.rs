//! Draw range normalization and validation.

use luckydraw_core::error::DrawError;
use serde::Serialize;

/// Largest sequence a single draw may request unless configured otherwise.
pub const DEFAULT_MAX_COUNT: u32 = 50;

/// A validated draw request: inclusive bounds, sequence length, uniqueness.
///
/// Constructed only through [`RangeSpec::validate`], so `lower <= upper`,
/// `1 <= count <= max_count`, and a unique spec always has enough slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSpec {
    lower: i64,
    upper: i64,
    count: u32,
    unique: bool,
}

impl RangeSpec {
    /// Normalizes and validates raw caller input.
    ///
    /// Bounds may arrive in either order. `count` is clamped into
    /// `[1, max_count]` rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `DrawError::Validation` if `max_count` is zero, and
    /// `DrawError::RangeExhausted` if `unique` is set and the range holds
    /// fewer integers than the clamped `count`.
    pub fn validate(
        min: i64,
        max: i64,
        count: i64,
        unique: bool,
        max_count: u32,
    ) -> Result<Self, DrawError> {
        if max_count == 0 {
            return Err(DrawError::Validation(
                "maximum count must be at least 1".to_owned(),
            ));
        }

        let lower = min.min(max);
        let upper = min.max(max);
        let count = u32::try_from(count.clamp(1, i64::from(max_count))).unwrap_or(max_count);

        let spec = Self {
            lower,
            upper,
            count,
            unique,
        };

        if unique && spec.slots() < u64::from(count) {
            return Err(DrawError::RangeExhausted {
                requested: count,
                available: spec.slots(),
            });
        }

        Ok(spec)
    }

    /// Inclusive lower bound.
    #[must_use]
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Inclusive upper bound.
    #[must_use]
    pub fn upper(&self) -> i64 {
        self.upper
    }

    /// Number of values to draw.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether drawn values must be pairwise distinct.
    #[must_use]
    pub fn unique(&self) -> bool {
        self.unique
    }

    /// Number of distinct integers in `[lower, upper]`, saturating at
    /// `u64::MAX` for the full `i64` range.
    #[must_use]
    pub fn slots(&self) -> u64 {
        slots_between(self.lower, self.upper)
    }
}

/// Number of integers in the inclusive range `[lower, upper]`.
pub(crate) fn slots_between(lower: i64, upper: i64) -> u64 {
    u64::try_from(i128::from(upper) - i128::from(lower) + 1).unwrap_or(u64::MAX)
}
