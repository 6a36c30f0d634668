/**
 * Database Operations for Chat Threads
 *
 * PostgreSQL implementation of the thread repository.
 *
 * # Schema
 *
 * - `chat_threads` - one row per pair, `thread_key` is UNIQUE,
 *   `participants` is a sorted `TEXT[2]`, `name_overlay` is JSONB
 * - `chat_messages` - one row per message, ordered by a `BIGSERIAL` id
 *
 * # Atomic find-or-create
 *
 * `append` runs in one transaction. The thread row is written with
 * `INSERT ... ON CONFLICT (thread_key) DO UPDATE`, which both creates the
 * thread on first use and locks the existing row otherwise, so concurrent
 * appends to one pair are serialized and never produce a second thread.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::backend::chat::error::ThreadError;
use crate::backend::chat::model::{StoredMessage, Thread};
use crate::backend::chat::overlay::NameOverlay;
use crate::backend::chat::repository::ThreadRepository;
use crate::backend::crypto::EncryptedMessage;
use crate::shared::ThreadKey;

/// Row of `chat_threads`
#[derive(Debug, sqlx::FromRow)]
struct ThreadRow {
    id: Uuid,
    thread_key: String,
    participants: Vec<String>,
    name_overlay: Json<NameOverlay>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row of `chat_messages`
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    thread_id: Uuid,
    sender: String,
    cipher_text: String,
    iv: String,
    sent_at: DateTime<Utc>,
}

impl From<MessageRow> for StoredMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            sender: row.sender,
            cipher_text: row.cipher_text,
            iv: row.iv,
            sent_at: row.sent_at,
        }
    }
}

impl ThreadRow {
    fn into_thread(self, messages: Vec<StoredMessage>) -> Result<Thread, ThreadError> {
        let key = ThreadKey::parse(&self.thread_key).ok_or_else(|| {
            ThreadError::Persistence(sqlx::Error::Decode(
                format!("malformed thread_key {:?}", self.thread_key).into(),
            ))
        })?;
        let participants: [String; 2] = self.participants.try_into().map_err(|p: Vec<String>| {
            ThreadError::Persistence(sqlx::Error::Decode(
                format!("thread {} has {} participants", key, p.len()).into(),
            ))
        })?;

        Ok(Thread {
            id: self.id,
            key,
            participants,
            name_overlay: self.name_overlay.0,
            messages,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const THREAD_COLUMNS: &str = "id, thread_key, participants, name_overlay, created_at, updated_at";

/// Threads containing `$1`, newest first. `@>` keeps the GIN index on
/// `participants` usable.
fn participant_query() -> String {
    format!(
        r#"
        SELECT {THREAD_COLUMNS}
        FROM chat_threads
        WHERE participants @> ARRAY[$1]::TEXT[]
        ORDER BY updated_at DESC
        "#
    )
}

/// Thread repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the messages of one thread in insertion order
    async fn load_messages<'e, E>(executor: E, thread_id: Uuid) -> Result<Vec<StoredMessage>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT thread_id, sender, cipher_text, iv, sent_at
            FROM chat_messages
            WHERE thread_id = $1
            ORDER BY id ASC
            "#
        )
        .bind(thread_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(StoredMessage::from).collect())
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    async fn append(
        &self,
        key: &ThreadKey,
        sender: &str,
        message: EncryptedMessage,
    ) -> Result<Thread, ThreadError> {
        let (low, high) = key.participants();
        let participants = vec![low.to_string(), high.to_string()];

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            INSERT INTO chat_threads (id, thread_key, participants, name_overlay, created_at, updated_at)
            VALUES ($1, $2, $3, '{{}}'::jsonb, NOW(), NOW())
            ON CONFLICT (thread_key) DO UPDATE SET updated_at = NOW()
            RETURNING {THREAD_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(key.as_str())
        .bind(&participants)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO chat_messages (thread_id, sender, cipher_text, iv, sent_at)
            VALUES (
                $1, $2, $3, $4,
                GREATEST(
                    clock_timestamp(),
                    COALESCE((SELECT MAX(sent_at) FROM chat_messages WHERE thread_id = $1), clock_timestamp())
                )
            )
            "#
        )
        .bind(row.id)
        .bind(sender)
        .bind(&message.cipher_text)
        .bind(&message.iv)
        .execute(&mut *tx)
        .await?;

        let messages = Self::load_messages(&mut *tx, row.id).await?;
        tx.commit().await?;

        tracing::debug!("Appended message to thread {} ({} messages)", key, messages.len());
        row.into_thread(messages)
    }

    async fn find_by_key(&self, key: &ThreadKey) -> Result<Option<Thread>, ThreadError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            "SELECT {THREAD_COLUMNS} FROM chat_threads WHERE thread_key = $1"
        ))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let messages = Self::load_messages(&self.pool, row.id).await?;
                row.into_thread(messages).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn find_by_participant(&self, identifier: &str) -> Result<Vec<Thread>, ThreadError> {
        let rows = sqlx::query_as::<_, ThreadRow>(&participant_query())
            .bind(identifier)
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let message_rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT thread_id, sender, cipher_text, iv, sent_at
            FROM chat_messages
            WHERE thread_id = ANY($1)
            ORDER BY id ASC
            "#
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_thread: HashMap<Uuid, Vec<StoredMessage>> = HashMap::new();
        for row in message_rows {
            by_thread.entry(row.thread_id).or_default().push(row.into());
        }

        rows.into_iter()
            .map(|row| {
                let messages = by_thread.remove(&row.id).unwrap_or_default();
                row.into_thread(messages)
            })
            .collect()
    }

    async fn set_overlay_name(
        &self,
        key: &ThreadKey,
        viewer: &str,
        name: &str,
    ) -> Result<Option<Thread>, ThreadError> {
        let row = sqlx::query_as::<_, ThreadRow>(&format!(
            r#"
            UPDATE chat_threads
            SET name_overlay = jsonb_set(name_overlay, ARRAY[$2::text], to_jsonb($3::text), true),
                updated_at = NOW()
            WHERE thread_key = $1
            RETURNING {THREAD_COLUMNS}
            "#
        ))
        .bind(key.as_str())
        .bind(viewer)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let messages = Self::load_messages(&self.pool, row.id).await?;
                row.into_thread(messages).map(Some)
            }
            None => Ok(None),
        }
    }
}
