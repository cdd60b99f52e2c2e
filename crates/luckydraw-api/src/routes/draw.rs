//! Routes for drawing and for reading the pending override.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use luckydraw_core::entry::{Actor, format_timestamp, render_values};
use luckydraw_core::error::DrawError;
use luckydraw_core::ticker::IntervalTicker;
use luckydraw_draw::application::draw_service::DrawOutcome;
use luckydraw_draw::application::query_handlers::{self, ActiveOverrideView};
use luckydraw_draw::domain::commands::RequestDraw;
use luckydraw_draw::domain::resolver::DrawSource;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

/// Header naming the caller's draw session. Requests without it each get a
/// session of their own.
pub const SESSION_HEADER: &str = "x-session-id";

/// Request body for POST /generate. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    /// One end of the range.
    pub min: i64,
    /// The other end of the range.
    pub max: i64,
    /// How many values to draw.
    pub count: i64,
    /// Whether values must be distinct.
    pub unique: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            count: 1,
            unique: false,
        }
    }
}

/// Response body for a settled draw.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Drawn values.
    pub values: Vec<i64>,
    /// Drawn values rendered for display.
    pub value: String,
    /// Whether the values were generated or overridden.
    pub source: DrawSource,
    /// ISO-8601 settle time.
    pub timestamp: String,
    /// Teaser frames shown during the reveal, in order.
    pub frames: Vec<Vec<i64>>,
}

fn draw_session(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| Uuid::new_v4().simple().to_string(), str::to_owned)
}

/// POST /generate
#[instrument(skip_all)]
async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: GenerateRequest = if body.iter().all(u8::is_ascii_whitespace) {
        GenerateRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| DrawError::Validation(format!("invalid draw request: {e}")))?
    };

    let command = RequestDraw {
        correlation_id: Uuid::new_v4(),
        min: request.min,
        max: request.max,
        count: request.count,
        unique: request.unique,
        actor: Actor::from_admin_flag(state.sessions.is_admin(&headers)),
        session: draw_session(&headers),
    };

    info!(correlation_id = %command.correlation_id, "handling request_draw command");

    let mut ticker = IntervalTicker::new(state.engine.policy().frame_interval);
    let mut frames = Vec::new();
    let outcome = state
        .engine
        .draw(&command, &mut ticker, &mut |_, teaser: &[i64]| {
            frames.push(teaser.to_vec());
        })
        .await?;

    let response = match outcome {
        DrawOutcome::Settled(result) => Json(GenerateResponse {
            value: render_values(&result.values),
            timestamp: format_timestamp(result.timestamp),
            values: result.values,
            source: result.source,
            frames,
        })
        .into_response(),
        DrawOutcome::Busy => ErrorBody::respond(
            StatusCode::CONFLICT,
            "draw_in_progress",
            "another draw in this session is still being revealed",
        ),
        DrawOutcome::Cancelled => ErrorBody::respond(
            StatusCode::CONFLICT,
            "draw_cancelled",
            "the draw was cancelled before it settled",
        ),
    };
    Ok(response)
}

/// GET /active
async fn active(State(state): State<AppState>) -> Json<ActiveOverrideView> {
    Json(query_handlers::get_active_override(state.engine.override_store()).await)
}

/// Returns the router for draw endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate))
        .route("/active", get(active))
}
