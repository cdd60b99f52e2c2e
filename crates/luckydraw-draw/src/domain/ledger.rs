//! Bounded, newest-first history of settled draws.

use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use luckydraw_core::entry::HistoryEntry;
use luckydraw_core::error::DrawError;
use luckydraw_core::store::HistoryStore;

/// Default number of entries kept.
pub const DEFAULT_CAPACITY: usize = 10;

/// Capped log of draw outcomes, most recent first.
///
/// Writers are serialized by the lock; readers get an owned snapshot, so
/// mutating a listed `Vec` never reaches the ledger.
#[derive(Debug)]
pub struct HistoryLedger {
    capacity: usize,
    entries: RwLock<VecDeque<HistoryEntry>>,
}

impl HistoryLedger {
    /// Creates an empty ledger. A zero `capacity` is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity + 1)),
        }
    }

    /// Maximum number of entries retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Prepends `entry`, evicting the oldest entry past capacity.
    pub fn record(&self, entry: HistoryEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.push_front(entry);
        entries.truncate(self.capacity);
    }

    /// Snapshot of the ledger, newest first.
    #[must_use]
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Replaces the contents with `entries` (newest first), keeping at most
    /// `capacity` of them.
    pub fn hydrate(&self, entries: Vec<HistoryEntry>) {
        let mut current = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *current = entries.into_iter().take(self.capacity).collect();
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the ledger holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl HistoryStore for HistoryLedger {
    async fn load(&self) -> Result<Vec<HistoryEntry>, DrawError> {
        Ok(self.list())
    }

    async fn append(&self, entry: HistoryEntry) -> Result<(), DrawError> {
        self.record(entry);
        Ok(())
    }
}
