/**
 * Send Handler
 *
 * POST /send appends a message to the thread between sender and receiver,
 * creating the thread on the first message.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::chat::store::ThreadStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::chat::{SendMessageRequest, SendMessageResponse};

/// # Errors
///
/// * `400 Bad Request` - a field is missing, or sender equals receiver
/// * `403 Forbidden` - `senderVirtualNumber` is not the caller
///
/// # Example Request
///
/// ```http
/// POST /send HTTP/1.1
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "senderVirtualNumber": "111", "receiverVirtualNumber": "222", "message": "hi" }
/// ```
pub async fn send_message(
    State(store): State<ThreadStore>,
    AuthUser(caller): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), BackendError> {
    request.validate().map_err(|e| {
        tracing::warn!("Rejected message from {}: {}", caller.virtual_number, e);
        BackendError::validation("Missing required fields")
    })?;
    caller.require_identity(&request.sender_virtual_number)?;

    let thread = store
        .append_message(
            &request.sender_virtual_number,
            &request.receiver_virtual_number,
            &request.sender_virtual_number,
            &request.message,
        )
        .await?;

    tracing::debug!(
        "Message from {} stored in thread {}",
        request.sender_virtual_number,
        thread.key
    );

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message: "Message saved".to_string(),
            chat: store.open(&thread)?,
        }),
    ))
}
