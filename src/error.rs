//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework.

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::constants::INVALID_WRONG_COUNT;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Submission errors
    #[error("{expected} characters expected but got {actual} at row {row}")]
    Format {
        expected: usize,
        actual: usize,
        row: usize,
    },

    #[error(
        "Invalid image size: expected {expected_height}x{expected_width}, got {actual_height}x{actual_width}"
    )]
    SizeMismatch {
        expected_height: usize,
        expected_width: usize,
        actual_height: usize,
        actual_width: usize,
    },

    #[error("Question {number} is not available")]
    InvalidQuestion { number: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Submission body is too large")]
    PayloadTooLarge,

    // Rate limiting
    #[error("Too many requests")]
    TooManyRequests,

    // Resource errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Snapshot persistence failure. Never leaves the ranking board.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot writer task failed: {0}")]
    Task(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Format { .. } => "FORMAT_ERROR",
            Self::SizeMismatch { .. } => "SIZE_MISMATCH",
            Self::InvalidQuestion { .. } => "INVALID_QUESTION",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Format { .. }
            | Self::SizeMismatch { .. }
            | Self::InvalidQuestion { .. }
            | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra payload attached to the error body, if any.
    ///
    /// Rejected attempts against a closed question still report a score pair,
    /// with the sentinel wrong count.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidQuestion { .. } => Some(serde_json::json!({
                "wrong": INVALID_WRONG_COUNT,
                "score": 0,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors but don't expose details to clients
        let message = match &self {
            AppError::Configuration(e) => {
                tracing::error!("Configuration error: {}", e);
                "A configuration error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Body read failures, including undecodable compressed bodies
impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidInput(rejection.body_text())
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message() {
        let err = AppError::Format {
            expected: 3,
            actual: 2,
            row: 1,
        };
        assert_eq!(err.to_string(), "3 characters expected but got 2 at row 1");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_question_carries_sentinel() {
        let details = AppError::InvalidQuestion { number: 4 }.details().unwrap();
        assert_eq!(details["wrong"], INVALID_WRONG_COUNT);
        assert_eq!(details["score"], 0);
        assert!(AppError::TooManyRequests.details().is_none());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::TooManyRequests.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::NotFound("leader".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_configuration_error_hides_details() {
        let response = AppError::Configuration("question 2: bad map".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "CONFIGURATION_ERROR");
        assert_eq!(json["error"]["message"], "A configuration error occurred");
        assert!(json["error"].get("details").is_none());
    }
}
