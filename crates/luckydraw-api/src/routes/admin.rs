//! Routes for admin sessions and staging override values.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use luckydraw_draw::application::command_handlers::{self, StagedOverride};
use luckydraw_draw::domain::commands::StageOverride;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::bearer_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /admin/login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin login name.
    pub username: String,
    /// Admin password.
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent admin requests.
    pub token: String,
}

/// Response body for GET /admin/check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Whether the presented token is live.
    pub authenticated: bool,
}

/// Response body for POST /admin/logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Always `true`; logout is idempotent.
    pub success: bool,
}

/// Request body for POST /admin/active: either one `value` or a `values`
/// queue. `values` wins if both are present.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    /// A single value for the next draw.
    pub value: Option<i64>,
    /// Values for the next draws, in order.
    pub values: Option<Vec<i64>>,
}

/// POST /admin/login
#[instrument(skip_all, fields(username = %request.username))]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.sessions.login(&request.username, &request.password)?;
    Ok(Json(LoginResponse { token }))
}

/// GET /admin/check
async fn check(State(state): State<AppState>, headers: HeaderMap) -> Json<CheckResponse> {
    Json(CheckResponse {
        authenticated: state.sessions.is_admin(&headers),
    })
}

/// POST /admin/logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<LogoutResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.logout(token);
    }
    Json(LogoutResponse { success: true })
}

/// POST /admin/active
#[instrument(skip_all)]
async fn set_active(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<StagedOverride>, ApiError> {
    let values = request
        .values
        .or_else(|| request.value.map(|v| vec![v]))
        .unwrap_or_default();

    let command = StageOverride {
        correlation_id: Uuid::new_v4(),
        values,
        is_admin: state.sessions.is_admin(&headers),
    };

    info!(correlation_id = %command.correlation_id, "handling stage_override command");

    let staged =
        command_handlers::handle_stage_override(&command, state.engine.override_store()).await?;

    Ok(Json(staged))
}

/// Returns the router for admin endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/check", get(check))
        .route("/admin/logout", post(logout))
        .route("/admin/active", post(set_active))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use luckydraw_core::store::OverrideStore;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::routes::draw::tests::test_app_state;

    async fn post(
        state: &AppState,
        uri: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
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

        let response = router()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn login_token(state: &AppState) -> String {
        let (status, json) = post(
            state,
            "/admin/login",
            None,
            &serde_json::json!({ "username": "admin", "password": "s3cret" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json["token"].as_str().unwrap().to_owned()
    }

    #[tokio::test]
    async fn test_login_with_bad_password_returns_401() {
        let state = test_app_state();

        let (status, json) = post(
            &state,
            "/admin/login",
            None,
            &serde_json::json!({ "username": "admin", "password": "nope" }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_set_active_without_token_returns_401_and_leaves_queue() {
        let state = test_app_state();

        let (status, _) = post(
            &state,
            "/admin/active",
            None,
            &serde_json::json!({ "value": 42 }),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(state.engine.override_store().pending().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_active_with_token_stages_value() {
        let state = test_app_state();
        let token = login_token(&state).await;

        let (status, json) = post(
            &state,
            "/admin/active",
            Some(&token),
            &serde_json::json!({ "value": 42 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"], 42);
        assert_eq!(json["queued"], 1);
    }

    #[tokio::test]
    async fn test_set_active_accepts_a_queue() {
        let state = test_app_state();
        let token = login_token(&state).await;

        let (status, json) = post(
            &state,
            "/admin/active",
            Some(&token),
            &serde_json::json!({ "values": [7, 8, 9] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"], 7);
        assert_eq!(json["queued"], 3);
    }

    #[tokio::test]
    async fn test_set_active_with_no_values_returns_400() {
        let state = test_app_state();
        let token = login_token(&state).await;

        let (status, json) = post(&state, "/admin/active", Some(&token), &serde_json::json!({}))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_logout_always_succeeds_and_revokes() {
        let state = test_app_state();
        let token = login_token(&state).await;

        let (status, json) = post(&state, "/admin/logout", Some(&token), &Value::Null).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert!(!state.sessions.is_valid(&token));

        let (status, _) = post(&state, "/admin/logout", None, &Value::Null).await;
        assert_eq!(status, StatusCode::OK);
    }
}
