//! Health check endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::error;

use wwi_db::MovementRepository;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `error` when the probe failed.
    pub status: &'static str,
    /// `connected` when the probe returned the expected value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
    /// Driver message when the probe failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Time of the check, RFC 3339 UTC.
    pub timestamp: String,
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let repo = MovementRepository::new(state.db.clone());
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    match repo.ping().await {
        Ok(connected) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                database: Some(if connected { "connected" } else { "error" }),
                error: None,
                timestamp,
            }),
        ),
        Err(e) => {
            error!(route = "health", error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "error",
                    database: None,
                    error: Some(e.to_string()),
                    timestamp,
                }),
            )
        }
    }
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
