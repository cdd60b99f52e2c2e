//! Luckydraw API — HTTP surface for the draw engine.
//!
//! Exposes draws, the pending override queue, the draw history and the
//! admin session endpoints as JSON over axum.

use axum::Router;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

/// Builds the application router with every route mounted.
pub fn build_router(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_router())
        .with_state(state)
}
