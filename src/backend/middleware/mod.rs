//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//!
//! - **`auth`** - bearer token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use vnchat::backend::middleware::{auth_middleware, AuthUser};
//! use vnchat::backend::server::state::AppState;
//!
//! async fn me(AuthUser(user): AuthUser) -> String {
//!     user.virtual_number
//! }
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/me", get(me))
//!         .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, bearer_token, AuthUser, AuthenticatedUser};
