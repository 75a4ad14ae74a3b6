//! Success envelope for API responses.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Report body flattened next to `"success": true`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

impl<T> Success<T> {
    /// Wraps a report body.
    pub const fn new(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Body of responses that carry a bare list.
#[derive(Debug, Serialize)]
pub struct DataList<T> {
    /// The list.
    pub data: Vec<T>,
}
