/**
 * Per-Thread Broadcast Channels
 *
 * One `tokio::sync::broadcast` channel per thread key. A connection that
 * joins a thread subscribes to its channel; a stored message is published to
 * the channel of its thread, reaching every connection subscribed at that
 * moment. Delivery is at-most-once: nothing is queued for absent
 * subscribers.
 *
 * Channels are created on first subscribe and dropped by
 * `cleanup_inactive_channels` once they have no receivers left.
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

use crate::shared::{ReceiveMessage, ThreadKey};

/// Buffered messages per channel before slow receivers start lagging
pub const CHANNEL_CAPACITY: usize = 100;

#[derive(Clone, Default)]
pub struct ThreadChannels {
    channels: Arc<Mutex<HashMap<ThreadKey, broadcast::Sender<ReceiveMessage>>>>,
}

impl ThreadChannels {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ThreadKey, broadcast::Sender<ReceiveMessage>>> {
        // the map holds no invariant a panicking holder could break
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribe to the channel of `key`, creating it if needed
    pub fn subscribe(&self, key: &ThreadKey) -> broadcast::Receiver<ReceiveMessage> {
        self.lock()
            .entry(key.clone())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Deliver `message` to the current subscribers of `key`.
    ///
    /// Returns the number of receivers reached, 0 when nobody listens.
    pub fn publish(&self, key: &ThreadKey, message: ReceiveMessage) -> usize {
        match self.lock().get(key) {
            Some(sender) => sender.send(message).unwrap_or(0),
            None => 0,
        }
    }

    /// Drop channels without subscribers, returning how many were removed
    pub fn cleanup_inactive_channels(&self) -> usize {
        let mut channels = self.lock();
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        before - channels.len()
    }

    pub fn subscriber_count(&self, key: &ThreadKey) -> usize {
        self.lock()
            .get(key)
            .map_or(0, |sender| sender.receiver_count())
    }

    pub fn channel_count(&self) -> usize {
        self.lock().len()
    }
}
