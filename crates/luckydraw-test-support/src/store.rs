//! Test stores — mock collaborator implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use luckydraw_core::entry::HistoryEntry;
use luckydraw_core::error::DrawError;
use luckydraw_core::store::{HistoryStore, OverrideStore};

/// A history store that serves a configured log from `load` and records
/// every `append` call.
#[derive(Debug, Default)]
pub struct RecordingHistoryStore {
    load_result: Vec<HistoryEntry>,
    appended: Mutex<Vec<HistoryEntry>>,
}

impl RecordingHistoryStore {
    /// Create a recording store that will return `load_result` from every
    /// `load` call.
    #[must_use]
    pub fn new(load_result: Vec<HistoryEntry>) -> Self {
        Self {
            load_result,
            appended: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all entries that were appended.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn appended_entries(&self) -> Vec<HistoryEntry> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl HistoryStore for RecordingHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEntry>, DrawError> {
        Ok(self.load_result.clone())
    }

    async fn append(&self, entry: HistoryEntry) -> Result<(), DrawError> {
        self.appended.lock().unwrap().push(entry);
        Ok(())
    }
}

/// A history store that always fails. Useful for testing the local-only
/// fallback.
#[derive(Debug)]
pub struct FailingHistoryStore;

#[async_trait]
impl HistoryStore for FailingHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEntry>, DrawError> {
        Err(DrawError::PersistenceUnavailable("connection refused".into()))
    }

    async fn append(&self, _entry: HistoryEntry) -> Result<(), DrawError> {
        Err(DrawError::PersistenceUnavailable("connection refused".into()))
    }
}

/// A history store that serves a configured log from `load` but fails every
/// `append`. Models a collaborator that accepts reads while writes are down.
#[derive(Debug, Default)]
pub struct ReadOnlyHistoryStore {
    load_result: Vec<HistoryEntry>,
}

impl ReadOnlyHistoryStore {
    /// Create a store that returns `load_result` from every `load` call.
    #[must_use]
    pub fn new(load_result: Vec<HistoryEntry>) -> Self {
        Self { load_result }
    }
}

#[async_trait]
impl HistoryStore for ReadOnlyHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEntry>, DrawError> {
        Ok(self.load_result.clone())
    }

    async fn append(&self, _entry: HistoryEntry) -> Result<(), DrawError> {
        Err(DrawError::PersistenceUnavailable("read-only replica".into()))
    }
}

/// An override store that always fails. Useful for testing the
/// pure-generation fallback.
#[derive(Debug)]
pub struct FailingOverrideStore;

#[async_trait]
impl OverrideStore for FailingOverrideStore {
    async fn peek(&self) -> Result<Option<i64>, DrawError> {
        Err(DrawError::OverrideUnavailable("connection refused".into()))
    }

    async fn pending(&self) -> Result<usize, DrawError> {
        Err(DrawError::OverrideUnavailable("connection refused".into()))
    }

    async fn replace(&self, _values: Vec<i64>) -> Result<(), DrawError> {
        Err(DrawError::OverrideUnavailable("connection refused".into()))
    }

    async fn take_next(&self) -> Result<Option<i64>, DrawError> {
        Err(DrawError::OverrideUnavailable("connection refused".into()))
    }
}
