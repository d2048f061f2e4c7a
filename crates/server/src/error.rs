//! Maps [`context::RelayError`] onto an HTTP response.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use context::RelayError;
use serde_json::json;

/// Thin wrapper so handlers can `?`-propagate a [`RelayError`] and get a
/// correctly-coded JSON body back, without every handler hand-rolling the
/// status mapping.
pub struct ApiError(pub RelayError);

impl From<RelayError> for ApiError {
    fn from(error: RelayError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::ToolsDisabled => StatusCode::FORBIDDEN,
            RelayError::UnsafeCode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::SandboxTimeout => StatusCode::GATEWAY_TIMEOUT,
            RelayError::SandboxError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            RelayError::BackendError(_) => StatusCode::BAD_GATEWAY,
            RelayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Cancelled => StatusCode::REQUEST_TIMEOUT,
            RelayError::NotFound(_) => StatusCode::NOT_FOUND,
            RelayError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.0.kind(), "message": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}
