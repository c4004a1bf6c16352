//! Application error types and their flat `{"error": ...}` HTTP mapping.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use crate::protocol::ErrorBody;

/// Message returned when the translation collaborator fails.
pub const TRANSLATION_ERROR_MESSAGE: &str = "Translation error occurred";
/// Message returned when the detection collaborator fails.
pub const DETECTION_ERROR_MESSAGE: &str = "Could not detect language.";

/// Error model used by configuration loading and the HTTP handlers.
///
/// Upstream provider details never leave the process: the `Translation` and
/// `Detection` variants carry no message and always render a fixed text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{}", TRANSLATION_ERROR_MESSAGE)]
    Translation,
    #[error("{}", DETECTION_ERROR_MESSAGE)]
    Detection,
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Creates a `400 Bad Request` error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates a generic internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status used when this error is rendered as a response.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Translation | Self::Detection | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
