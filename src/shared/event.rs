/**
 * Real-time Event System
 *
 * This module defines the frames exchanged over the realtime WebSocket.
 * Every frame is a JSON object with an `event` name and a `data` payload:
 *
 * ```json
 * {"event": "send-message", "data": {"sender": "111", "receiver": "222", "message": "hi"}}
 * ```
 *
 * Clients join the channel of a thread (named by its thread key) and then
 * receive a `receive-message` frame for every message appended to that
 * thread while they are subscribed.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Frames sent by clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Subscribe to the channel of a thread
    Join { channel: String },
    /// Unsubscribe from a channel
    Leave { channel: String },
    /// Store a message and fan it out to the thread channel
    SendMessage(SendMessageEvent),
}

impl ClientEvent {
    /// Decode a text frame
    pub fn from_json(text: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Payload of `send-message`
///
/// Fields default to empty so that a frame with a missing field still
/// decodes and is rejected by [`SendMessageEvent::validate`] instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SendMessageEvent {
    #[serde(default, alias = "senderVirtualNumber")]
    pub sender: String,
    #[serde(default, alias = "receiverVirtualNumber")]
    pub receiver: String,
    #[serde(default)]
    pub message: String,
}

impl SendMessageEvent {
    pub fn validate(&self) -> Result<(), SharedError> {
        SharedError::require("sender", &self.sender)?;
        SharedError::require("receiver", &self.receiver)?;
        SharedError::require("message", &self.message)
    }
}

/// Frames sent by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// The connection is now subscribed to `channel`
    Joined { channel: String },
    /// The join was refused
    JoinRejected { channel: String, reason: String },
    /// A message was appended to a joined thread
    ReceiveMessage(ReceiveMessage),
}

impl ServerEvent {
    /// Encode as a text frame
    pub fn to_json(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Payload of `receive-message`. The message is plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveMessage {
    pub sender_identifier: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
