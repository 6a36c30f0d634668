//! Shared Module
//!
//! This module contains the types exchanged with clients: HTTP request and
//! response bodies for the chat endpoints, realtime WebSocket frames, thread
//! key derivation, and the errors those types can produce.
//!
//! # Overview
//!
//! Nothing in here depends on the server stack, so the module compiles
//! without the `ssr` feature and can be reused by a client.

/// Thread key derivation
pub mod thread_key;

/// Chat request and response types
pub mod chat;

/// Realtime WebSocket frames
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use thread_key::ThreadKey;
pub use event::{ClientEvent, ServerEvent, ReceiveMessage, SendMessageEvent};
pub use error::SharedError;
