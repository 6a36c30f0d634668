/**
 * Current User Handlers
 *
 * GET /me returns the authenticated caller, DELETE /user/delete removes the
 * caller's account. Both sit behind the auth middleware.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{MessageResponse, UserResponse};
use crate::backend::auth::users::{delete_user, get_user_by_id};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - missing or invalid token (from the middleware)
/// * `404 Not Found` - the account no longer exists
/// * `503 Service Unavailable` - database not configured
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(caller): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;

    let user = get_user_by_id(&pool, caller.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete the caller's account
///
/// Threads the user took part in are left in place; they belong to both
/// participants.
pub async fn delete_account(
    State(pool): State<Option<PgPool>>,
    AuthUser(caller): AuthUser,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;

    if !delete_user(&pool, caller.user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!("Deleted account {} ({})", caller.user_id, caller.email);
    Ok(Json(MessageResponse::new("Account deleted successfully")))
}
