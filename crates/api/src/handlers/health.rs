use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"error"`.
    pub status: &'static str,
    /// `"connected"` or `"disconnected"`.
    pub database: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/health
///
/// Probes the database. 200 when it answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: "connected",
                timestamp,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error",
                    database: "disconnected",
                    timestamp,
                }),
            )
        }
    }
}
