//! Realtime Module
//!
//! WebSocket fan-out of chat messages. A connection joins the channel of a
//! thread (named by its thread key) and receives every message stored to
//! that thread through the realtime path while it stays joined.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── channels.rs  - One broadcast channel per thread key
//! ├── fanout.rs    - Join authorization and send-message handling
//! ├── session.rs   - Per-connection subscriptions
//! └── socket.rs    - GET /ws upgrade handler
//! ```
//!
//! # Delivery
//!
//! At-most-once and live only. A client that is not joined when a message
//! is published never sees it over the socket and reads it later with
//! `GET /chats/{sender}/{receiver}`.

pub mod channels;

pub mod fanout;

pub mod session;

/// WebSocket upgrade handler
pub mod socket;

pub use channels::ThreadChannels;
pub use fanout::{authorize_join, deliver, FanoutError, JoinRejection};
pub use session::RealtimeSession;
pub use socket::ws_handler;
