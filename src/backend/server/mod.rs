//! Server Module
//!
//! Configuration, application state and startup.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports and documentation
//! ├── config.rs  - ServerConfig from environment variables, database loading
//! ├── state.rs   - AppState and FromRef implementations
//! └── init.rs    - create_app
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use vnchat::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::create_app;
pub use state::AppState;
