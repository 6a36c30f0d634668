/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the caller to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::Role;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub virtual_number: String,
}

impl AuthenticatedUser {
    /// 403 unless `identifier` is the caller's own virtual number
    pub fn require_identity(&self, identifier: &str) -> Result<(), BackendError> {
        if self.virtual_number == identifier {
            Ok(())
        } else {
            tracing::warn!(
                "User {} tried to act as {}",
                self.virtual_number,
                identifier
            );
            Err(BackendError::forbidden("Access denied"))
        }
    }

    pub fn require_admin(&self) -> Result<(), BackendError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            tracing::warn!("Non-admin user {} denied", self.user_id);
            Err(BackendError::forbidden("Access denied"))
        }
    }
}

/// Verify `token` and resolve the caller.
///
/// When a database is configured the user must still exist, so tokens of
/// deleted accounts stop working before they expire.
pub async fn authenticate(
    app_state: &AppState,
    token: &str,
) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(app_state.jwt_secret.as_str(), token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Invalid token")
    })?;

    if let Some(pool) = &app_state.db_pool {
        if !user_exists(pool, user_id).await? {
            tracing::warn!("Token for deleted user {}", user_id);
            return Err(BackendError::unauthorized("Invalid token"));
        }
    }

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: Role::parse(&claims.role),
        virtual_number: claims.virtual_number,
    })
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it (see [`authenticate`])
/// 3. Attaches the user to request extensions for the [`AuthUser`] extractor
///
/// Responds 401 if the token is missing or invalid.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        BackendError::unauthorized("No token provided")
    })?;

    let user = authenticate(&app_state, token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn user_exists(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
    use crate::backend::auth::users::get_user_by_id;

    Ok(get_user_by_id(pool, user_id).await?.is_some())
}

/// Axum extractor for authenticated user
///
/// Reads the user that `auth_middleware` put into request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("No token provided")
            })?;

        Ok(AuthUser(user))
    }
}
