//! Route modules.

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod draw;
pub mod health;
pub mod history;

/// Routes mounted under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(draw::router())
        .merge(history::router())
        .merge(admin::router())
}
