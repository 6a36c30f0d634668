//! Chat Handlers Module
//!
//! Axum handlers for the chat endpoints. Every route sits behind the auth
//! middleware, and the participant named in the request must be the caller.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── send.rs     - POST /send
//! ├── threads.rs  - GET /chats/{sender}/{receiver}, GET /chats/user/{phoneNumber},
//! │                 GET /users/chats
//! └── names.rs    - POST /users/save-name
//! ```
//!
//! Threads are decrypted right before they are returned; message bodies in
//! responses are plaintext.

pub mod send;

pub mod threads;

pub mod names;

pub use names::save_name;
pub use send::send_message;
pub use threads::{get_thread, list_user_threads, user_chats};
