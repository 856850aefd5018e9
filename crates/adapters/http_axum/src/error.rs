//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wtpbridge_domain::error::WtpBridgeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`WtpBridgeError`] to an HTTP response with appropriate status code.
///
/// Handlers only fail before anything reaches the remote (bad identifier,
/// unknown accessory); remote failures surface later as a command outcome.
/// Any other error is logged and reported as `500`.
#[derive(Debug)]
pub struct ApiError(WtpBridgeError);

impl From<WtpBridgeError> for ApiError {
    fn from(err: WtpBridgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            WtpBridgeError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            WtpBridgeError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            err => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
