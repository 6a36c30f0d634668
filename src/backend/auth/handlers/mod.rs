//! Authentication Handlers Module
//!
//! HTTP handlers for the account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Request and response types
//! ├── register.rs   - POST /register
//! ├── login.rs      - POST /login
//! ├── me.rs         - GET /me, DELETE /user/delete
//! └── directory.rs  - GET /users, GET /users/exists/{virtualNumber}
//! ```
//!
//! # Flow
//!
//! 1. **Register**: name, email, password, phone -> user created -> virtual number returned
//! 2. **Login**: email and password -> credentials verified -> JWT token returned
//! 3. **Me**: JWT token -> token verified by the middleware -> user info returned

/// Request and response types
pub mod types;

pub mod register;

pub mod login;

pub mod me;

pub mod directory;

pub use types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse};

pub use directory::{list_all_users, user_exists};
pub use login::login;
pub use me::{delete_account, get_me};
pub use register::register;
