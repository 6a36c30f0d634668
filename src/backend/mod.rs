//! Backend Module
//!
//! All server-side code: an Axum HTTP server for accounts, call logs,
//! encrypted two-party chat threads, OTP identity verification and a
//! WebSocket channel for live message fan-out.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - configuration, application state, startup
//! - **`routes`** - route table and router layers
//! - **`auth`** - registration, login, JWT sessions, user records
//! - **`middleware`** - bearer token authentication
//! - **`chat`** - thread store, repositories, chat HTTP handlers
//! - **`crypto`** - AES-256-CBC message codec
//! - **`realtime`** - thread channels and the WebSocket endpoint
//! - **`calls`** - call log records
//! - **`kyc`** - OTP issue and verification
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs       - vnchat-server binary
//! ├── server/
//! ├── routes/
//! ├── auth/
//! ├── middleware/
//! ├── chat/
//! ├── crypto/
//! ├── realtime/
//! ├── calls/
//! ├── kyc/
//! └── error/
//! ```
//!
//! # Message Flow
//!
//! `POST /send` and a WebSocket `send-message` both go through
//! `chat::ThreadStore::append_message`, which encrypts the body and appends
//! it to the one thread of the pair. Only the WebSocket path then publishes
//! the plaintext to the thread channel.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Encrypted two-party chat threads
pub mod chat;

/// Message encryption
pub mod crypto;

/// WebSocket fan-out
pub mod realtime;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Call logs
pub mod calls;

/// OTP identity verification
pub mod kyc;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
