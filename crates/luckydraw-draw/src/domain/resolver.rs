//! Reconciling a fresh draw with administratively pinned values.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use luckydraw_core::error::DrawError;
use luckydraw_core::store::OverrideStore;
use serde::{Deserialize, Serialize};

/// Where the values of a draw came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    /// Produced by the sequence generator.
    Generated,
    /// Substituted from the pending override queue.
    Overridden,
}

impl fmt::Display for DrawSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated => f.write_str("generated"),
            Self::Overridden => f.write_str("overridden"),
        }
    }
}

/// The settled outcome of one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawResult {
    /// Drawn values, in order.
    pub values: Vec<i64>,
    /// Whether the values were generated or overridden.
    pub source: DrawSource,
    /// When the draw settled.
    pub timestamp: DateTime<Utc>,
}

/// Picks the final sequence for a draw.
///
/// A pending override always wins and becomes a one-element sequence; the
/// override is not checked against the draw's range or uniqueness.
#[must_use]
pub fn resolve(pending: Option<i64>, fresh: Vec<i64>) -> (Vec<i64>, DrawSource) {
    match pending {
        Some(value) => (vec![value], DrawSource::Overridden),
        None => (fresh, DrawSource::Generated),
    }
}

/// In-process pending override queue.
///
/// A submission replaces the queue; each draw pops the head exactly once.
#[derive(Debug, Default)]
pub struct OverrideSlot {
    queue: Mutex<VecDeque<i64>>,
}

impl OverrideSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<i64>> {
        self.queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl OverrideStore for OverrideSlot {
    async fn peek(&self) -> Result<Option<i64>, DrawError> {
        Ok(self.lock().front().copied())
    }

    async fn pending(&self) -> Result<usize, DrawError> {
        Ok(self.lock().len())
    }

    async fn replace(&self, values: Vec<i64>) -> Result<(), DrawError> {
        *self.lock() = values.into();
        Ok(())
    }

    async fn take_next(&self) -> Result<Option<i64>, DrawError> {
        Ok(self.lock().pop_front())
    }
}
