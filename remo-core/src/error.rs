use serde_json::json;
use tracing::{error, warn};

use crate::http::{header, IntoResponse, Json, Response, StatusCode};

/// Framework error taxonomy.
///
/// Every variant carries the message surfaced to the caller. Rendering
/// produces a boom-style JSON payload:
///
/// ```json
/// { "statusCode": 422, "error": "Unprocessable Entity", "message": "..." }
/// ```
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    /// Used when a presented token references an identity that no longer exists.
    NotAcceptable(String),
    /// Data-format errors, e.g. unparseable `_filters`/`_options` JSON.
    UnprocessableEntity(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Canonical reason phrase, mirroring the `error` field of a boom payload.
    fn reason(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "Bad Request",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "Not Found",
            AppError::NotAcceptable(_) => "Not Acceptable",
            AppError::UnprocessableEntity(_) => "Unprocessable Entity",
            AppError::Internal(_) => "Internal Server Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(m)
            | AppError::Unauthorized(m)
            | AppError::Forbidden(m)
            | AppError::NotFound(m)
            | AppError::NotAcceptable(m)
            | AppError::UnprocessableEntity(m)
            | AppError::Internal(m) => m,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), message = self.message());
        } else {
            warn!(status = status.as_u16(), message = self.message());
        }
        let body = json!({
            "statusCode": status.as_u16(),
            "error": self.reason(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.reason(), self.message())
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for AppError {}

/// Malformed JSON is a data-format error, not a server fault.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::UnprocessableEntity(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Helper to create a plain JSON error response outside of `AppError`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({
        "statusCode": status.as_u16(),
        "error": status.canonical_reason().unwrap_or(""),
        "message": message.into(),
    });
    (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
}
