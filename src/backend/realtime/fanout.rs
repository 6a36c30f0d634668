/**
 * Realtime Fan-out
 *
 * The two decisions the realtime layer makes: who may join a thread
 * channel, and what happens to a `send-message` event.
 *
 * A `send-message` event is validated, stored through the same
 * `ThreadStore` as `POST /send` (so both paths address the same thread), and
 * the plaintext is then published to the thread channel. Failures are
 * returned to the caller, which logs them and drops the event; nothing is
 * reported back to the sending client.
 */

use thiserror::Error;

use crate::backend::chat::{ThreadError, ThreadStore};
use crate::backend::realtime::channels::ThreadChannels;
use crate::shared::{ReceiveMessage, SendMessageEvent, SharedError, ThreadKey};

#[derive(Debug, Error)]
pub enum FanoutError {
    #[error("invalid send-message payload: {0}")]
    Invalid(#[from] SharedError),

    #[error("{author} tried to send as {sender}")]
    Impersonation { author: String, sender: String },

    #[error(transparent)]
    Store(#[from] ThreadError),
}

/// Why a join was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRejection {
    #[error("channel is not a thread key")]
    MalformedChannel,

    #[error("not a participant of this thread")]
    NotParticipant,

    #[error("thread lookup failed")]
    Unavailable,
}

/// Decide whether `identity` may subscribe to `channel`.
///
/// The caller must be one of the thread's participants. A thread that does
/// not exist yet may be joined by either identifier encoded in the key, so
/// both sides can listen before the first message.
pub async fn authorize_join(
    store: &ThreadStore,
    identity: &str,
    channel: &str,
) -> Result<ThreadKey, JoinRejection> {
    let key = ThreadKey::parse(channel).ok_or(JoinRejection::MalformedChannel)?;

    let allowed = match store.find(&key).await {
        Ok(Some(thread)) => thread.has_participant(identity),
        Ok(None) => key.includes(identity),
        Err(e) => {
            tracing::error!("Thread lookup for join of {} failed: {}", key, e);
            return Err(JoinRejection::Unavailable);
        }
    };

    if allowed {
        Ok(key)
    } else {
        Err(JoinRejection::NotParticipant)
    }
}

/// Store a realtime message sent by `author` and publish it to its thread.
///
/// Returns the frame that was published.
pub async fn deliver(
    store: &ThreadStore,
    channels: &ThreadChannels,
    author: &str,
    event: SendMessageEvent,
) -> Result<ReceiveMessage, FanoutError> {
    event.validate()?;
    if event.sender != author {
        return Err(FanoutError::Impersonation {
            author: author.to_string(),
            sender: event.sender,
        });
    }

    let thread = store
        .append_message(&event.sender, &event.receiver, &event.sender, &event.message)
        .await?;

    let timestamp = thread.last_sent_at().unwrap_or(thread.updated_at);
    let frame = ReceiveMessage {
        sender_identifier: event.sender,
        message: event.message,
        timestamp,
    };

    let reached = channels.publish(&thread.key, frame.clone());
    tracing::debug!("Fan-out on {} reached {} subscribers", thread.key, reached);

    Ok(frame)
}
