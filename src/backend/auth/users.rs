/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Stored value of `users.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "Admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "Admin",
        }
    }

    /// Unknown values are treated as the unprivileged role
    pub fn parse(raw: &str) -> Self {
        if raw == Role::Admin.as_str() {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: uuid::Uuid,
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Real phone number given at registration
    pub phone: String,
    /// 11-digit number assigned at registration, used as the chat identifier
    pub virtual_number: String,
    /// `user` or `Admin`
    pub role: String,
    pub kyc_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub virtual_number: String,
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, phone, virtual_number, role, kyc_verified, created_at, updated_at";

/// Create a new user with role `user`
///
/// Fails with a unique violation when the email or the virtual number is
/// already taken.
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let id = uuid::Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, name, email, password_hash, phone, virtual_number, role, kyc_verified, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, $8, $8)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.phone)
    .bind(&new_user.virtual_number)
    .bind(Role::User.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: uuid::Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get the user registered with both `email` and `phone`
pub async fn get_user_by_email_and_phone(
    pool: &PgPool,
    email: &str,
    phone: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND phone = $2"
    ))
    .bind(email)
    .bind(phone)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn user_exists_by_virtual_number(
    pool: &PgPool,
    virtual_number: &str,
) -> Result<bool, sqlx::Error> {
    let exists: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(SELECT 1 FROM users WHERE virtual_number = $1)
        "#
    )
    .bind(virtual_number)
    .fetch_one(pool)
    .await?;

    Ok(exists.0)
}

/// Delete a user, returning whether a row was removed
pub async fn delete_user(pool: &PgPool, id: uuid::Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All users, oldest first
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Set `kyc_verified` for the user with `email`
///
/// Returns `None` if no such user exists.
pub async fn mark_kyc_verified(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET kyc_verified = TRUE, updated_at = $2
        WHERE email = $1
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(email)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Whether `err` is a unique constraint violation on `constraint`
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
