//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports and documentation
//! ├── router.rs      - Router assembly, CORS and tracing layers
//! └── api_routes.rs  - Public and protected API routes
//! ```
//!
//! Protected routes use `route_layer`, so the auth middleware only runs for
//! requests that matched one of them and unknown paths still reach the 404
//! fallback.

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
