//! Query handlers for the draw context.
//!
//! Both queries are read-only and never fail: an unreachable collaborator
//! degrades to local state.

use luckydraw_core::entry::HistoryEntry;
use luckydraw_core::store::OverrideStore;
use serde::Serialize;
use tracing::warn;

use crate::application::draw_service::DrawEngine;

/// Read-only view of the pending override queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveOverrideView {
    /// The value the next draw will return, if any.
    pub value: Option<i64>,
    /// Number of values queued.
    pub queued: usize,
}

/// Returns the head of the override queue. An unreachable source reads as
/// "nothing pending".
pub async fn get_active_override(store: &dyn OverrideStore) -> ActiveOverrideView {
    let peeked = store.peek().await;
    let pending = store.pending().await;
    match (peeked, pending) {
        (Ok(value), Ok(queued)) => ActiveOverrideView { value, queued },
        (Err(err), _) | (_, Err(err)) => {
            warn!(error = %err, "override source unavailable");
            ActiveOverrideView {
                value: None,
                queued: 0,
            }
        }
    }
}

/// Returns the draw history, newest first, capped at the ledger capacity.
///
/// Reads the history collaborator when one is configured and falls back to
/// the local ledger if it fails. Once a history write has failed, the
/// collaborator is missing draws and the local ledger is served instead.
pub async fn get_history(engine: &DrawEngine) -> Vec<HistoryEntry> {
    let Some(store) = engine.authoritative_history() else {
        return engine.ledger().list();
    };
    match store.load().await {
        Ok(mut entries) => {
            entries.truncate(engine.ledger().capacity());
            entries
        }
        Err(err) => {
            warn!(error = %err, "history unavailable; serving local ledger");
            engine.ledger().list()
        }
    }
}
