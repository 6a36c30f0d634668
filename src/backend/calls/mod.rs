//! Call Log Module
//!
//! Records incoming and outgoing calls per phone number and returns the
//! history newest first.
//!
//! - **`db`** - `Call` model and database operations
//! - **`handlers`** - POST /calls, GET /calls/{phoneNumber}

pub mod db;

pub mod handlers;

pub use db::{Call, CallType};
pub use handlers::{call_history, save_call};
