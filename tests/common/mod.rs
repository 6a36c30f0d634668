//! Common test utilities and helpers
//!
//! - In-process application builder with an in-memory thread store
//! - Authentication helpers that mint tokens without a database
//! - Database fixture for the ignored PostgreSQL tests
//! - Custom assertion macros

pub mod app;
pub mod auth_helpers;
pub mod database;

pub use app::*;
pub use auth_helpers::*;
pub use database::*;
