/**
 * Thread Store Accessor
 *
 * The one entry point for chat persistence. Handlers and the realtime layer
 * go through `ThreadStore`, which derives the thread key, encrypts bodies
 * with the process-wide `MessageCodec` and delegates storage to a
 * `ThreadRepository`.
 *
 * Threads returned by the mutating and query methods keep their messages
 * encrypted. `open` produces the decrypted `ThreadView` sent to clients.
 */

use std::sync::Arc;

use crate::backend::chat::error::ThreadError;
use crate::backend::chat::model::Thread;
use crate::backend::chat::overlay::resolve_display_name;
use crate::backend::chat::repository::ThreadRepository;
use crate::backend::crypto::MessageCodec;
use crate::shared::chat::{ChatContact, MessageView, ThreadView};
use crate::shared::thread_key::SEPARATOR;
use crate::shared::{SharedError, ThreadKey};

#[derive(Clone)]
pub struct ThreadStore {
    repo: Arc<dyn ThreadRepository>,
    codec: Arc<MessageCodec>,
}

impl ThreadStore {
    pub fn new(repo: Arc<dyn ThreadRepository>, codec: Arc<MessageCodec>) -> Self {
        Self { repo, codec }
    }

    /// Encrypt `message` and append it to the thread between `a` and `b`,
    /// creating the thread on first use.
    pub async fn append_message(
        &self,
        a: &str,
        b: &str,
        sender: &str,
        message: &str,
    ) -> Result<Thread, ThreadError> {
        let key = pair_key(a, b)?;
        if sender != a && sender != b {
            return Err(ThreadError::invalid("sender", "must be one of the participants"));
        }
        SharedError::require("message", message)?;

        let encrypted = self.codec.encrypt(message);
        self.repo.append(&key, sender, encrypted).await
    }

    /// The thread between `a` and `b`. Never creates one.
    pub async fn get_thread(&self, a: &str, b: &str) -> Result<Thread, ThreadError> {
        let key = pair_key(a, b)?;
        self.repo
            .find_by_key(&key)
            .await?
            .ok_or(ThreadError::NotFound { key })
    }

    /// Lookup by an already-derived key, `None` if absent
    pub async fn find(&self, key: &ThreadKey) -> Result<Option<Thread>, ThreadError> {
        self.repo.find_by_key(key).await
    }

    /// Every thread of `identifier`, most recently updated first
    pub async fn list_threads_for_participant(
        &self,
        identifier: &str,
    ) -> Result<Vec<Thread>, ThreadError> {
        SharedError::require("identifier", identifier)?;
        self.repo.find_by_participant(identifier).await
    }

    /// Save the name under which `viewer` sees `subject`.
    ///
    /// Fails with `ThreadError::NotFound` when the two have no thread yet.
    pub async fn set_display_name(
        &self,
        viewer: &str,
        subject: &str,
        name: &str,
    ) -> Result<Thread, ThreadError> {
        let key = pair_key(viewer, subject)?;
        SharedError::require("name", name)?;

        self.repo
            .set_overlay_name(&key, viewer, name.trim())
            .await?
            .ok_or(ThreadError::NotFound { key })
    }

    /// Contacts of `viewer` with the names `viewer` sees them under
    pub async fn contacts_for(&self, viewer: &str) -> Result<Vec<ChatContact>, ThreadError> {
        let threads = self.list_threads_for_participant(viewer).await?;
        Ok(threads
            .iter()
            .filter_map(|thread| {
                let number = thread.other_participant(viewer)?.to_string();
                let name = resolve_display_name(thread, viewer)?;
                Some(ChatContact { number, name })
            })
            .collect())
    }

    pub fn decrypt(&self, cipher_text: &str, iv: &str) -> Result<String, ThreadError> {
        Ok(self.codec.decrypt(cipher_text, iv)?)
    }

    /// Decrypted client view of `thread`
    pub fn open(&self, thread: &Thread) -> Result<ThreadView, ThreadError> {
        let messages = thread
            .messages
            .iter()
            .map(|m| {
                Ok(MessageView {
                    sender_virtual_number: m.sender.clone(),
                    message: self.decrypt(&m.cipher_text, &m.iv)?,
                    timestamp: m.sent_at,
                })
            })
            .collect::<Result<Vec<_>, ThreadError>>()?;

        Ok(ThreadView {
            thread_key: thread.key.to_string(),
            participants: thread.participants.to_vec(),
            saved_names: thread.name_overlay.as_map().clone(),
            messages,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
        })
    }
}

/// Validated key for two distinct, non-blank participants
fn pair_key(a: &str, b: &str) -> Result<ThreadKey, ThreadError> {
    SharedError::require("participantA", a)?;
    SharedError::require("participantB", b)?;
    if a == b {
        return Err(ThreadError::invalid("participants", "must be two different identifiers"));
    }
    if a.contains(SEPARATOR) || b.contains(SEPARATOR) {
        return Err(ThreadError::invalid("participants", "must not contain '_'"));
    }
    Ok(ThreadKey::derive(a, b))
}
