//! Ports for the external collaborators a draw depends on.

use async_trait::async_trait;

use crate::entry::HistoryEntry;
use crate::error::DrawError;

/// Source and sink of administratively pinned draw values.
///
/// Pending values form a FIFO queue. Implementations must make
/// `take_next` atomic: two concurrent callers never receive the same value.
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// Returns the value the next draw would consume, without consuming it.
    async fn peek(&self) -> Result<Option<i64>, DrawError>;

    /// Returns the number of values still queued.
    async fn pending(&self) -> Result<usize, DrawError>;

    /// Replaces the whole queue with `values`.
    async fn replace(&self, values: Vec<i64>) -> Result<(), DrawError>;

    /// Removes and returns the head of the queue, if any.
    async fn take_next(&self) -> Result<Option<i64>, DrawError>;
}

/// Append-only log of past draws, newest first.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Loads the log, most recent entry first.
    async fn load(&self) -> Result<Vec<HistoryEntry>, DrawError>;

    /// Appends one entry.
    async fn append(&self, entry: HistoryEntry) -> Result<(), DrawError>;
}
