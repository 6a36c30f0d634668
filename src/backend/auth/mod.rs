//! Authentication Module
//!
//! This module handles user registration, login, and session management.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`virtual_number`** - the 11-digit chat identifier assigned at registration
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for account endpoints
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens are used for stateless authentication
//! - Tokens expire after one day
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

pub mod virtual_number;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{delete_account, get_me, list_all_users, login, register, user_exists};
pub use sessions::{create_token, verify_token, Claims, JwtSecret};
pub use users::{Role, User};
