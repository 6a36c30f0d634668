/**
 * Save Name Handler
 *
 * POST /users/save-name stores the name under which `currentUser` sees
 * `targetNumber`. The other participant's view is untouched, and no thread
 * is created if the two have never exchanged a message.
 */

use axum::{extract::State, response::Json};

use crate::backend::chat::error::ThreadError;
use crate::backend::chat::store::ThreadStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::chat::{SaveNameRequest, SaveNameResponse};

pub async fn save_name(
    State(store): State<ThreadStore>,
    AuthUser(caller): AuthUser,
    Json(request): Json<SaveNameRequest>,
) -> Result<Json<SaveNameResponse>, BackendError> {
    request
        .validate()
        .map_err(|_| BackendError::validation("Missing fields in request"))?;
    caller.require_identity(&request.current_user)?;

    let thread = store
        .set_display_name(&request.current_user, &request.target_number, &request.name)
        .await
        .map_err(|e| match e {
            ThreadError::NotFound { .. } => {
                BackendError::not_found("Chat not found between the users")
            }
            other => other.into(),
        })?;

    tracing::info!(
        "{} saved a name for {} in thread {}",
        request.current_user,
        request.target_number,
        thread.key
    );

    Ok(Json(SaveNameResponse {
        message: "Name saved successfully.".to_string(),
        chat: store.open(&thread)?,
    }))
}
