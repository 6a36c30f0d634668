//! Message Encryption
//!
//! Chat message bodies are encrypted at rest with a single process-wide key.
//! See [`codec::MessageCodec`].

/// AES-256-CBC message codec
pub mod codec;

pub use codec::{CodecError, EncryptedMessage, MessageCodec};
