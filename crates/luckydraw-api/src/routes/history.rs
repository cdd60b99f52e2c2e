//! Draw history endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use luckydraw_core::entry::HistoryEntry;
use luckydraw_draw::application::query_handlers;

use crate::state::AppState;

/// GET /history
async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(query_handlers::get_history(&state.engine).await)
}

/// Returns the router for the history endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/history", get(list_history))
}
