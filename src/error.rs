use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type for the front-end server.
///
/// Covers the failure classes this layer can produce on its own: building
/// outbound requests, decoding upstream payloads, and rejecting malformed
/// client input. Backend-reported errors (4xx/5xx bodies) are never wrapped
/// in this type; proxy handlers relay them verbatim.
#[derive(Error, Debug)]
pub enum AppError {
    // ===== HTTP & Network Errors =====
    #[error("HTTP header error: {0}")]
    HttpHeader(#[from] axum::http::header::InvalidHeaderValue),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    // ===== Upstream Payload Errors =====
    #[error("Upstream response error: {0}")]
    Upstream(String),

    // ===== Validation Errors =====
    #[error("Validation error: {0}")]
    Validation(String),

    // ===== Internal Server Errors =====
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Reqwest(_) | AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::HttpHeader(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message (without sensitive details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation error: {}", msg),
            AppError::Reqwest(_) => "External service error".to_string(),
            AppError::Upstream(_) => "External service returned an unexpected response".to_string(),
            AppError::HttpHeader(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Get error code for programmatic error handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Reqwest(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::HttpHeader(_) => "HEADER_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log this error with appropriate level and context
    pub fn log(&self) {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = %code,
                status = %status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = %code,
                "Client error occurred"
            );
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let status = self.status_code();
        let error_code = self.error_code();
        let user_message = self.user_message();

        // For server errors, don't expose internal details to the client
        let response_body = if status.is_server_error() {
            json!({
                "error": "Internal server error",
                "error_code": error_code,
                "status": status.as_u16(),
            })
        } else {
            json!({
                "error": user_message,
                "error_code": error_code,
                "status": status.as_u16(),
            })
        };

        (status, axum::Json(response_body)).into_response()
    }
}

// ============================================================================
// Helper functions for creating common errors
// ============================================================================

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Create an upstream payload error
    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::Upstream(msg.into())
    }

    /// Create an internal server error
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
