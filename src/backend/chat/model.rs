/**
 * Thread Model
 *
 * A thread is the single conversation record between two participants.
 * Messages are kept encrypted in this model; see `store::ThreadStore::open`
 * for the decrypted view.
 */

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::chat::overlay::NameOverlay;
use crate::shared::ThreadKey;

/// One encrypted entry of a thread's message log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    /// Which of the two participants sent it
    pub sender: String,
    /// Hex cipher text
    pub cipher_text: String,
    /// Hex IV used to produce `cipher_text`
    pub iv: String,
    pub sent_at: DateTime<Utc>,
}

/// Conversation between exactly two participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: Uuid,
    pub key: ThreadKey,
    /// Sorted ascending, always two distinct identifiers
    pub participants: [String; 2],
    pub name_overlay: NameOverlay,
    /// Append-only, in insertion order
    pub messages: Vec<StoredMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thread {
    /// Empty thread for `key`, as created by the first append
    pub fn new(key: ThreadKey, now: DateTime<Utc>) -> Self {
        let (low, high) = key.participants();
        let participants = [low.to_string(), high.to_string()];
        Self {
            id: Uuid::new_v4(),
            key,
            participants,
            name_overlay: NameOverlay::default(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_participant(&self, identifier: &str) -> bool {
        self.participants.iter().any(|p| p == identifier)
    }

    /// The participant that is not `viewer`, or `None` if `viewer` is not in
    /// this thread
    pub fn other_participant(&self, viewer: &str) -> Option<&str> {
        match &self.participants {
            [a, b] if a == viewer => Some(b.as_str()),
            [a, b] if b == viewer => Some(a.as_str()),
            _ => None,
        }
    }

    /// Timestamp of the last message, if any
    pub fn last_sent_at(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(|m| m.sent_at)
    }
}
