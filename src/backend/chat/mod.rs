//! Chat Backend Module
//!
//! Two-party encrypted chat threads.
//!
//! # Architecture
//!
//! - **`model`** - `Thread` and its encrypted `StoredMessage` log
//! - **`overlay`** - per-viewer display names
//! - **`repository`** - storage capability, implemented by `db` (PostgreSQL)
//!   and `memory` (in-process)
//! - **`store`** - `ThreadStore`, the accessor used by handlers and the
//!   realtime layer
//! - **`handlers`** - HTTP endpoints
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vnchat::backend::chat::{MemoryThreadRepository, ThreadStore};
//! use vnchat::backend::crypto::MessageCodec;
//!
//! # async fn example() {
//! let store = ThreadStore::new(
//!     Arc::new(MemoryThreadRepository::new()),
//!     Arc::new(MessageCodec::new([0u8; 32])),
//! );
//! let thread = store.append_message("111", "222", "111", "hi").await.unwrap();
//! assert_eq!(thread.key.as_str(), "111_222");
//! # }
//! ```

pub mod model;

/// Per-viewer display names
pub mod overlay;

pub mod error;

/// Storage capability
pub mod repository;

/// In-process thread storage
pub mod memory;

/// Database operations for chat threads
pub mod db;

/// Thread store accessor
pub mod store;

/// HTTP endpoints
pub mod handlers;

pub use db::PgThreadRepository;
pub use error::ThreadError;
pub use memory::MemoryThreadRepository;
pub use model::{StoredMessage, Thread};
pub use overlay::{resolve_display_name, NameOverlay};
pub use repository::ThreadRepository;
pub use store::ThreadStore;
