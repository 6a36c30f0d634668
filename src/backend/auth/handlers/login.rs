/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown email and wrong password return the same 401 response
 * - User passwords are never returned in responses
 */
use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse, UserResponse};
use crate::backend::auth::sessions::{create_token, JwtSecret};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /login HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "securepassword123" }
/// ```
pub async fn login(
    State(pool): State<Option<PgPool>>,
    State(secret): State<JwtSecret>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, BackendError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::ServiceUnavailable
    })?;
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&pool, request.email.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(secret.as_str(), &user)?;

    tracing::info!("User logged in: {} ({})", user.email, user.virtual_number);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserResponse::from(user),
    }))
}
