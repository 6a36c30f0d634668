/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /register.
 *
 * # Registration Process
 *
 * 1. Validate the request
 * 2. Reject an email that is already registered
 * 3. Hash the password using bcrypt
 * 4. Insert the user with a freshly drawn virtual number, drawing again if
 *    the number collides with an existing one
 * 5. Return the virtual number
 *
 * # Validation
 *
 * - `name`, `email`, `password` and `phone` are required
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{RegisterRequest, RegisterResponse};
use crate::backend::auth::users::{create_user, get_user_by_email, is_unique_violation, NewUser};
use crate::backend::auth::virtual_number::generate_virtual_number;
use crate::backend::error::BackendError;

/// Attempts at drawing an unused virtual number before giving up
const MAX_NUMBER_ATTEMPTS: usize = 8;

const EMAIL_CONSTRAINT: &str = "users_email_key";
const VIRTUAL_NUMBER_CONSTRAINT: &str = "users_virtual_number_key";

fn validate(request: &RegisterRequest) -> Result<(), BackendError> {
    if [&request.name, &request.email, &request.password, &request.phone]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(BackendError::validation("Name, email, password and phone are required"));
    }
    if !request.email.contains('@') {
        return Err(BackendError::validation("Invalid email format"));
    }
    if request.password.len() < 8 {
        return Err(BackendError::validation("Password must be at least 8 characters"));
    }
    Ok(())
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing field, malformed email, short password
/// * `409 Conflict` - email already registered
/// * `503 Service Unavailable` - database not configured
/// * `500 Internal Server Error` - hashing or database failure
///
/// # Example Response
///
/// ```json
/// { "message": "User registered successfully", "virtualNumber": "48213957720" }
/// ```
pub async fn register(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), BackendError> {
    let pool = pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::ServiceUnavailable
    })?;

    if let Err(e) = validate(&request) {
        tracing::warn!("Rejected registration for {}: {}", request.email, e);
        return Err(e);
    }
    let email = request.email.trim().to_string();

    if get_user_by_email(&pool, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::conflict("User already exists"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let mut new_user = NewUser {
        name: request.name.trim().to_string(),
        email,
        password_hash,
        phone: request.phone.trim().to_string(),
        virtual_number: String::new(),
    };

    for attempt in 1..=MAX_NUMBER_ATTEMPTS {
        new_user.virtual_number = generate_virtual_number();

        match create_user(&pool, &new_user).await {
            Ok(user) => {
                tracing::info!("User registered: {} ({})", user.email, user.virtual_number);
                return Ok((
                    StatusCode::CREATED,
                    Json(RegisterResponse {
                        message: "User registered successfully".to_string(),
                        virtual_number: user.virtual_number,
                    }),
                ));
            }
            Err(e) if is_unique_violation(&e, VIRTUAL_NUMBER_CONSTRAINT) => {
                tracing::debug!("Virtual number collision on attempt {}", attempt);
            }
            Err(e) if is_unique_violation(&e, EMAIL_CONSTRAINT) => {
                tracing::warn!("Email registered concurrently: {}", new_user.email);
                return Err(BackendError::conflict("User already exists"));
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::error!("No free virtual number after {} attempts", MAX_NUMBER_ATTEMPTS);
    Err(BackendError::internal("could not allocate a virtual number"))
}
