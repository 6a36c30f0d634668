/**
 * Thread Query Handlers
 *
 * - GET /chats/{sender}/{receiver} - one thread, 404 if the pair never talked
 * - GET /chats/user/{phoneNumber} - every thread of a participant, most
 *   recently updated first
 * - GET /users/chats?number= - the participant's contacts with the names
 *   the participant saved for them
 */

use axum::{
    extract::{Path, Query, State},
    response::Json,
};

use crate::backend::chat::store::ThreadStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::chat::{ChatContact, ThreadListResponse, ThreadResponse, UserChatsQuery};

pub async fn get_thread(
    State(store): State<ThreadStore>,
    AuthUser(caller): AuthUser,
    Path((sender, receiver)): Path<(String, String)>,
) -> Result<Json<ThreadResponse>, BackendError> {
    if caller.virtual_number != sender && caller.virtual_number != receiver {
        return Err(BackendError::forbidden("Access denied"));
    }

    let thread = store.get_thread(&sender, &receiver).await?;
    Ok(Json(ThreadResponse {
        chat: store.open(&thread)?,
    }))
}

pub async fn list_user_threads(
    State(store): State<ThreadStore>,
    AuthUser(caller): AuthUser,
    Path(phone_number): Path<String>,
) -> Result<Json<ThreadListResponse>, BackendError> {
    caller.require_identity(&phone_number)?;

    let threads = store.list_threads_for_participant(&phone_number).await?;
    let chats = threads
        .iter()
        .map(|thread| store.open(thread))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ThreadListResponse { chats }))
}

pub async fn user_chats(
    State(store): State<ThreadStore>,
    AuthUser(caller): AuthUser,
    Query(query): Query<UserChatsQuery>,
) -> Result<Json<Vec<ChatContact>>, BackendError> {
    let number = query
        .number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| BackendError::validation("Missing user number"))?;
    caller.require_identity(number)?;

    Ok(Json(store.contacts_for(number).await?))
}
