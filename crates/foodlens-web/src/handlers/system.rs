//! Evidence store health.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::state::SharedState;

/// GET /api/health - 200 when the evidence store answers, 503 otherwise
pub async fn api_health(State(state): State<SharedState>) -> (StatusCode, Json<Value>) {
    let checked_at = Utc::now().to_rfc3339();
    match state.engine.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "checked_at": checked_at })),
        ),
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "error": e.kind(),
                    "message": e.to_string(),
                    "checked_at": checked_at,
                })),
            )
        }
    }
}
