//! Error responses for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dockdash_common::error::DashError;
use dockdash_common::types::{ContainerId, ErrorResponse};

/// Result type alias for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// An error as seen by API clients: a status code and a generic message.
///
/// The underlying engine error is logged when the `ApiError` is built and
/// never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Wraps an engine failure on `id` behind `message`.
    #[must_use]
    pub fn engine(message: &'static str, id: Option<&ContainerId>, err: &DashError) -> Self {
        match id {
            Some(id) => tracing::error!(id = %id, error = %err, "{message}"),
            None => tracing::error!(error = %err, "{message}"),
        }
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Returns the message sent to the client.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}
