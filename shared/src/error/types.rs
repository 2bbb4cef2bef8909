//! Error types and the JSON error body

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error with structured error code
///
/// This is the primary error type for the reports API, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - A client-facing message (never storage internals)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Missing or wrong `Authorization` header
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::InvalidApiKey)
    }

    /// Unknown route or wrong HTTP method
    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound)
    }

    pub fn report_not_found() -> Self {
        Self::new(ErrorCode::ReportNotFound)
    }

    /// Generic 500; callers log the underlying cause before building it
    pub fn internal() -> Self {
        Self::new(ErrorCode::InternalError)
    }
}

/// Error response body: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.message.clone(),
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::ReportNotFound);
        assert_eq!(err.code, ErrorCode::ReportNotFound);
        assert_eq!(err.message, "Report not found");
    }

    #[test]
    fn test_app_error_display_is_message() {
        assert_eq!(format!("{}", AppError::report_not_found()), "Report not found");
    }

    #[test]
    fn test_convenience_constructors() {
        let err = AppError::unauthorized();
        assert_eq!(err.message, "Unauthorized: Invalid API key");
        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);

        let err = AppError::not_found();
        assert_eq!(err.message, "Not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err = AppError::internal();
        assert_eq!(err.message, "Internal server error");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_serialize() {
        let body = ErrorBody::from(&AppError::report_not_found());
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"Report not found"}"#);
    }

    #[test]
    fn test_into_response_status() {
        use axum::response::IntoResponse;

        let response = AppError::unauthorized().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AppError::internal().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
