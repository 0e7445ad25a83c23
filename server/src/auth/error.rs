//! Authentication Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Signature verification failures. All map to `401 Unauthorized`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// `X-Signature` header absent.
    #[error("Missing signature header")]
    MissingSignature,

    /// `X-Signature-Timestamp` header absent.
    #[error("Missing signature timestamp header")]
    MissingTimestamp,

    /// Signature is not hex-encoded SHA-256 output.
    #[error("Malformed signature")]
    InvalidSignature,

    /// Timestamp is not an integer.
    #[error("Malformed signature timestamp")]
    InvalidTimestamp,

    /// Timestamp outside the accepted window.
    #[error("Signature timestamp is too old or too far in the future")]
    StaleTimestamp,

    /// Signature does not match the request.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// Body could not be read (or exceeded the size limit).
    #[error("Request body could not be read")]
    InvalidBody,
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl AuthError {
    /// Machine-readable code used in the response body.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingSignature => "MISSING_SIGNATURE",
            Self::MissingTimestamp => "MISSING_TIMESTAMP",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::InvalidTimestamp => "INVALID_TIMESTAMP",
            Self::StaleTimestamp => "STALE_TIMESTAMP",
            Self::SignatureMismatch => "SIGNATURE_MISMATCH",
            Self::InvalidBody => "INVALID_BODY",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        });

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;
