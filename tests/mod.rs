//! Test suite for vnchat
//!
//! - **`common`** - app builder, token helpers, database fixture, assertions
//! - **`integration`** - HTTP and WebSocket tests against the full router
//! - **`property`** - proptest properties of thread keys, the codec and
//!   virtual numbers
//!
//! Tests that need PostgreSQL are `#[ignore]`d; run them with
//! `DATABASE_URL=... cargo test -- --ignored`.

#[cfg(feature = "ssr")]
pub mod common;
#[cfg(feature = "ssr")]
pub mod integration;
