//! Shared Error Types
//!
//! Errors raised while validating or decoding the wire types in
//! [`crate::shared`]. They carry no server state and are usable from any
//! client build.
//!
//! # Error Categories
//!
//! - `ValidationError` - a required field is missing or malformed
//! - `SerializationError` - JSON encoding or decoding failed
//!
//! # Usage
//!
//! ```rust
//! use vnchat::shared::error::SharedError;
//!
//! let error = SharedError::validation("message", "Message cannot be empty");
//! assert!(error.to_string().contains("message"));
//! ```
use thiserror::Error;

/// Errors shared by the server and any client of the wire types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Fail with a validation error when `value` is blank.
    pub fn require(field: &str, value: &str) -> Result<(), Self> {
        if value.trim().is_empty() {
            Err(Self::validation(field, "is required"))
        } else {
            Ok(())
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
