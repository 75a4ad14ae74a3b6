//! Error envelope for API responses.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use wwi_core::movements::MovementError;
use wwi_db::ReportQueryError;
use wwi_shared::AppError;
use wwi_shared::error::NOT_FOUND_MESSAGE;

/// An [`AppError`] rendered as `{ "success": false, "error": <message> }`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(json!({
                "success": false,
                "error": self.0.client_message(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<MovementError> for ApiError {
    fn from(err: MovementError) -> Self {
        Self(err.into())
    }
}

impl From<ReportQueryError> for ApiError {
    fn from(err: ReportQueryError) -> Self {
        Self(err.into())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        Self(AppError::Validation(err.body_text()))
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

/// Renders a handler panic as the generic 500 envelope.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "Handler panicked");

    ApiError(AppError::Internal(detail.to_string())).into_response()
}
