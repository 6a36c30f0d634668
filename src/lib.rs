//! vnchat - Messaging Backend
//!
//! vnchat is the server side of a phone-style messaging application. Users
//! register and receive an 11-digit virtual number, which is the identifier
//! they chat under. The crate provides:
//!
//! - Registration, login, and JWT-authenticated account endpoints
//! - Call-log recording
//! - A two-party chat thread store with AES-encrypted message bodies
//! - Realtime fan-out of new messages over WebSocket channels
//! - An OTP-based KYC verification flow
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types, thread key derivation, shared errors
//!   - Always compiled, no server dependencies
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP and WebSocket server
//!   - PostgreSQL persistence via sqlx
//!   - Message codec, thread store, realtime channels
//!   - Authentication, calls, KYC
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Server build. Disable it to use only the
//!   `shared` types from a client.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vnchat::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Addressing
//!
//! A conversation between two virtual numbers is stored once, under the key
//! obtained by sorting the two numbers and joining them with `_`. The same key
//! names the realtime channel the two participants subscribe to.
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation of wire types
//! - `backend::error::BackendError` for everything an HTTP handler can return

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
