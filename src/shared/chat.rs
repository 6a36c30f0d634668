/**
 * Chat Wire Types
 *
 * Request and response bodies of the chat HTTP endpoints. Field names are
 * camelCase on the wire so existing clients keep working.
 *
 * Message bodies in these types are always plaintext: threads are stored
 * encrypted and decrypted by the server right before they are returned.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::error::SharedError;

/// Body of `POST /send`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender_virtual_number: String,
    #[serde(default)]
    pub receiver_virtual_number: String,
    #[serde(default)]
    pub message: String,
}

impl SendMessageRequest {
    /// All three fields are required
    pub fn validate(&self) -> Result<(), SharedError> {
        SharedError::require("senderVirtualNumber", &self.sender_virtual_number)?;
        SharedError::require("receiverVirtualNumber", &self.receiver_virtual_number)?;
        SharedError::require("message", &self.message)
    }
}

/// One decrypted message of a thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub sender_virtual_number: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A thread as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThreadView {
    pub thread_key: String,
    pub participants: Vec<String>,
    /// Overlay names keyed by the viewer who chose them
    pub saved_names: BTreeMap<String, String>,
    pub messages: Vec<MessageView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response of `POST /send`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: String,
    pub chat: ThreadView,
}

/// Response of `GET /chats/{sender}/{receiver}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub chat: ThreadView,
}

/// Response of `GET /chats/user/{phoneNumber}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadListResponse {
    pub chats: Vec<ThreadView>,
}

/// Query of `GET /users/chats`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserChatsQuery {
    pub number: Option<String>,
}

/// Entry of the `GET /users/chats` contact list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatContact {
    /// The other participant's virtual number
    pub number: String,
    /// Overlay name chosen by the requesting user, or `number` when unset
    pub name: String,
}

/// Body of `POST /users/save-name`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveNameRequest {
    #[serde(default)]
    pub current_user: String,
    #[serde(default)]
    pub target_number: String,
    #[serde(default)]
    pub name: String,
}

impl SaveNameRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        SharedError::require("currentUser", &self.current_user)?;
        SharedError::require("targetNumber", &self.target_number)?;
        SharedError::require("name", &self.name)
    }
}

/// Response of `POST /users/save-name`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveNameResponse {
    pub message: String,
    pub chat: ThreadView,
}
