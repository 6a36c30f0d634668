/**
 * In-Memory Thread Repository
 *
 * Keeps threads in a `HashMap` behind a `tokio::sync::RwLock`. Used when the
 * server runs without `DATABASE_URL`, and by tests. Nothing survives a
 * restart.
 *
 * Every mutation happens under the write lock, which makes the
 * find-or-create in `append` atomic.
 */

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::chat::error::ThreadError;
use crate::backend::chat::model::{StoredMessage, Thread};
use crate::backend::chat::repository::ThreadRepository;
use crate::backend::crypto::EncryptedMessage;
use crate::shared::ThreadKey;

#[derive(Clone, Default)]
pub struct MemoryThreadRepository {
    threads: Arc<RwLock<HashMap<ThreadKey, Thread>>>,
}

impl MemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored threads
    pub async fn len(&self) -> usize {
        self.threads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.threads.read().await.is_empty()
    }
}

#[async_trait]
impl ThreadRepository for MemoryThreadRepository {
    async fn append(
        &self,
        key: &ThreadKey,
        sender: &str,
        message: EncryptedMessage,
    ) -> Result<Thread, ThreadError> {
        let now = Utc::now();
        let mut threads = self.threads.write().await;
        let thread = threads
            .entry(key.clone())
            .or_insert_with(|| Thread::new(key.clone(), now));

        // keep sent_at non-decreasing even if the wall clock steps back
        let sent_at = thread.last_sent_at().map_or(now, |last| last.max(now));
        thread.messages.push(StoredMessage {
            sender: sender.to_string(),
            cipher_text: message.cipher_text,
            iv: message.iv,
            sent_at,
        });
        thread.updated_at = sent_at;

        Ok(thread.clone())
    }

    async fn find_by_key(&self, key: &ThreadKey) -> Result<Option<Thread>, ThreadError> {
        Ok(self.threads.read().await.get(key).cloned())
    }

    async fn find_by_participant(&self, identifier: &str) -> Result<Vec<Thread>, ThreadError> {
        let threads = self.threads.read().await;
        let mut matching: Vec<Thread> = threads
            .values()
            .filter(|t| t.has_participant(identifier))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(matching)
    }

    async fn set_overlay_name(
        &self,
        key: &ThreadKey,
        viewer: &str,
        name: &str,
    ) -> Result<Option<Thread>, ThreadError> {
        let mut threads = self.threads.write().await;
        let Some(thread) = threads.get_mut(key) else {
            return Ok(None);
        };
        thread.name_overlay.set(viewer, name);
        thread.updated_at = thread.updated_at.max(Utc::now());
        Ok(Some(thread.clone()))
    }
}
