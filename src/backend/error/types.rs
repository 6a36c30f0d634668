/**
 * Backend Error Types
 *
 * This module defines the error type returned by HTTP handlers. Every
 * variant maps to one status code, and converts into a JSON response (see
 * `conversion.rs`).
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - `Validation` - missing or malformed input (400)
 * - `Unauthorized` - missing, malformed, or expired token (401)
 * - `Forbidden` - authenticated but not allowed (403)
 * - `NotFound` - the addressed record does not exist (404)
 * - `Conflict` - a unique field is already taken (409)
 *
 * ## Server errors
 *
 * - `ServiceUnavailable` - the database is not configured (503)
 * - `Persistence`, `Decryption`, `Mail`, `Internal` - failures the client
 *   cannot act on (500). Their detail is logged; the response only carries a
 *   generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::chat::ThreadError;
use crate::backend::crypto::CodecError;
use crate::backend::kyc::mailer::MailError;
use crate::shared::SharedError;

/// Errors returned by HTTP handlers
///
/// # Usage
///
/// ```rust
/// use vnchat::backend::error::BackendError;
///
/// let err = BackendError::validation("Phone number and call type are required");
/// assert_eq!(err.status_code().as_u16(), 400);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database not configured")]
    ServiceUnavailable,

    /// Wire type validation failure
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error(transparent)]
    Decryption(#[from] CodecError),

    #[error(transparent)]
    Mail(#[from] MailError),

    /// Any other server-side failure (hashing, token signing)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(_) | Self::Decryption(_) | Self::Mail(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to the client
    ///
    /// Server-side failures are reduced to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::Persistence(_) | Self::Decryption(_) | Self::Internal(_) => {
                "Server error".to_string()
            }
            Self::Mail(_) => "Failed to send OTP".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ThreadError> for BackendError {
    fn from(err: ThreadError) -> Self {
        match err {
            ThreadError::Validation(e) => Self::SharedError(e),
            ThreadError::NotFound { .. } => {
                Self::NotFound("No chat found between these numbers".to_string())
            }
            ThreadError::Codec(e) => Self::Decryption(e),
            ThreadError::Persistence(e) => Self::Persistence(e),
        }
    }
}

impl From<bcrypt::BcryptError> for BackendError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<jsonwebtoken::errors::Error> for BackendError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(format!("token signing failed: {}", err))
    }
}
