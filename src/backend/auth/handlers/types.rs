/**
 * Authentication Handler Types
 *
 * Request and response bodies of the account endpoints. Field names are
 * camelCase on the wire.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Body of `POST /register`
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    /// Plain password, hashed before storage
    pub password: String,
    /// Real phone number
    pub phone: String,
}

/// Response of `POST /register`
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub virtual_number: String,
}

/// Body of `POST /login`
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /login`
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    /// JWT token (one day expiration)
    pub token: String,
    pub user: UserResponse,
}

/// User response (without sensitive data)
///
/// Contains user information that is safe to return to clients.
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: String,
    pub virtual_number: String,
    pub kyc_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
            phone: user.phone,
            virtual_number: user.virtual_number,
            kyc_verified: user.kyc_verified,
            created_at: user.created_at,
        }
    }
}

/// Response carrying only a status message
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `GET /users/exists/{virtualNumber}`
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ExistsResponse {
    pub exists: bool,
}
