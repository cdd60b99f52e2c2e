//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use luckydraw_api::auth::AdminSessions;
use luckydraw_api::build_router;
use luckydraw_api::config::AdminCredentials;
use luckydraw_api::state::AppState;
use luckydraw_core::clock::Clock;
use luckydraw_core::rng::DeterministicRng;
use luckydraw_core::store::HistoryStore;
use luckydraw_draw::application::draw_service::{DrawEngine, DrawPolicy};
use luckydraw_draw::domain::resolver::OverrideSlot;
use luckydraw_test_support::{FixedClock, MockRng};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Three-frame reveal with no delay between frames.
fn test_policy() -> DrawPolicy {
    DrawPolicy {
        frames: 3,
        frame_interval: Duration::ZERO,
        ..DrawPolicy::default()
    }
}

/// Build the full app router with a reveal that takes real time, so that
/// overlapping draws can be observed.
pub fn build_paced_app() -> Router {
    let policy = DrawPolicy {
        frame_interval: Duration::from_millis(20),
        ..test_policy()
    };
    router_for(engine_with_policy(policy, MockRng))
}

/// Build the full app router with deterministic Clock/RNG and no history
/// collaborator. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> Router {
    build_test_app_with(MockRng, None)
}

/// Build the full app router with a custom RNG and a history collaborator.
/// The ledger is hydrated before the router is built.
pub async fn build_hydrated_app(
    rng: impl DeterministicRng + Send + 'static,
    history: Arc<dyn HistoryStore>,
) -> Router {
    let engine = engine_with(rng).with_history_store(history);
    engine.hydrate().await;
    router_for(engine)
}

/// Build the full app router with a custom RNG and an optional
/// history collaborator, without hydrating.
pub fn build_test_app_with(
    rng: impl DeterministicRng + Send + 'static,
    history: Option<Arc<dyn HistoryStore>>,
) -> Router {
    let mut engine = engine_with(rng);
    if let Some(history) = history {
        engine = engine.with_history_store(history);
    }
    router_for(engine)
}

fn engine_with(rng: impl DeterministicRng + Send + 'static) -> DrawEngine {
    engine_with_policy(test_policy(), rng)
}

fn engine_with_policy(
    policy: DrawPolicy,
    rng: impl DeterministicRng + Send + 'static,
) -> DrawEngine {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    DrawEngine::new(
        policy,
        fixed_clock(),
        rng,
        Arc::new(OverrideSlot::new()),
    )
}

fn router_for(engine: DrawEngine) -> Router {
    let credentials = AdminCredentials {
        username: ADMIN_USERNAME.to_owned(),
        password: ADMIN_PASSWORD.to_owned(),
    };
    let sessions = AdminSessions::new(&credentials, Duration::from_secs(3_600), fixed_clock());
    build_router(AppState::new(engine, sessions))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_json_as(app, uri, None, body).await
}

/// Send a POST request with a JSON body and an optional bearer token.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST /api/generate request tagged with a draw session.
pub async fn generate_in_session(
    app: Router,
    session: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate")
        .header("content-type", "application/json")
        .header("x-session-id", session)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    get_json_as(app, uri, None).await
}

/// Send a GET request with an optional bearer token.
pub async fn get_json_as(
    app: Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).unwrap();

    send(app, request).await
}

/// Log in with the test credentials and return the bearer token.
pub async fn login(app: Router) -> String {
    let (status, json) = post_json(
        app,
        "/api/admin/login",
        &serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["token"].as_str().unwrap().to_owned()
}
