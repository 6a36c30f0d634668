/**
 * Thread Persistence Capability
 *
 * The storage operations the thread store needs, behind a trait so that the
 * server can run on PostgreSQL (`db::PgThreadRepository`) or, without a
 * database, on the in-process `memory::MemoryThreadRepository`.
 *
 * # Contract
 *
 * - `append` is a find-or-create plus append in one atomic step. Two
 *   concurrent first messages for the same key must end up in one thread.
 * - `sent_at` of an appended message is never earlier than the previous
 *   message of the same thread.
 * - `find_by_participant` returns most recently updated threads first.
 * - `set_overlay_name` never creates a thread.
 */

use async_trait::async_trait;

use crate::backend::chat::error::ThreadError;
use crate::backend::chat::model::Thread;
use crate::backend::crypto::EncryptedMessage;
use crate::shared::ThreadKey;

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Upsert the thread for `key` and append one encrypted message
    async fn append(
        &self,
        key: &ThreadKey,
        sender: &str,
        message: EncryptedMessage,
    ) -> Result<Thread, ThreadError>;

    async fn find_by_key(&self, key: &ThreadKey) -> Result<Option<Thread>, ThreadError>;

    /// Every thread `identifier` takes part in, newest activity first
    async fn find_by_participant(&self, identifier: &str) -> Result<Vec<Thread>, ThreadError>;

    /// Set `name_overlay[viewer] = name`; `None` if the thread does not exist
    async fn set_overlay_name(
        &self,
        key: &ThreadKey,
        viewer: &str,
        name: &str,
    ) -> Result<Option<Thread>, ThreadError>;
}
