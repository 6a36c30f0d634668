//! Thread store errors

use thiserror::Error;

use crate::backend::crypto::CodecError;
use crate::shared::{SharedError, ThreadKey};

#[derive(Debug, Error)]
pub enum ThreadError {
    /// Missing or malformed participant, sender, name, or message
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// No thread exists for the pair
    #[error("Thread not found: {key}")]
    NotFound { key: ThreadKey },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("Thread persistence failed: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl ThreadError {
    pub fn invalid(field: &str, message: &str) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }
}
