//! User directory handlers: the admin user list and the public
//! virtual-number existence check.

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{ExistsResponse, UserResponse};
use crate::backend::auth::users::{list_users, user_exists_by_virtual_number};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// GET /users, role `Admin` only
pub async fn list_all_users(
    State(pool): State<Option<PgPool>>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<UserResponse>>, BackendError> {
    caller.require_admin()?;
    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;

    let users = list_users(&pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/exists/{virtualNumber}
pub async fn user_exists(
    State(pool): State<Option<PgPool>>,
    Path(virtual_number): Path<String>,
) -> Result<Json<ExistsResponse>, BackendError> {
    let pool = pool.ok_or(BackendError::ServiceUnavailable)?;

    let exists = user_exists_by_virtual_number(&pool, &virtual_number).await?;
    Ok(Json(ExistsResponse { exists }))
}
