//! Luckydraw API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use luckydraw_api::auth::AdminSessions;
use luckydraw_api::config::Config;
use luckydraw_api::state::AppState;
use luckydraw_api::{build_router, telemetry};
use luckydraw_core::clock::{Clock, SystemClock};
use luckydraw_core::rng::{DeterministicRng, StdRngSource};
use luckydraw_draw::application::draw_service::DrawEngine;
use luckydraw_draw::domain::resolver::OverrideSlot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let telemetry = telemetry::init("luckydraw-api")?;

    tracing::info!("Starting luckydraw API server");

    let config = Config::from_env()?;

    // Build application state.
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
        Arc::new(Mutex::new(StdRngSource::from_entropy()));
    let engine = DrawEngine::new(
        config.policy,
        Arc::clone(&clock),
        rng,
        Arc::new(OverrideSlot::new()),
    );
    // History lives in the local ledger only. A durable log plugs in through
    // `DrawEngine::with_history_store`; `hydrate` then seeds the ledger from it.
    engine.hydrate().await;
    let sessions = AdminSessions::new(&config.admin, config.session_ttl, clock);
    let app_state = AppState::new(engine, sessions);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!(
        %addr,
        frames = config.policy.frames,
        history_capacity = config.policy.history_capacity,
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "failed to listen for shutdown signal");
            }
        })
        .await?;

    telemetry.shutdown();
    Ok(())
}
