//! Shared application state.

use std::sync::Arc;

use luckydraw_draw::application::draw_service::DrawEngine;

use crate::auth::AdminSessions;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The draw engine owning the override queue and history ledger.
    pub engine: Arc<DrawEngine>,
    /// Live admin bearer tokens.
    pub sessions: Arc<AdminSessions>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(engine: DrawEngine, sessions: AdminSessions) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::new(sessions),
        }
    }
}
