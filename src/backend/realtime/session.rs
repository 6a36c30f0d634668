/**
 * Realtime Session
 *
 * State of one authenticated WebSocket connection: which thread channels it
 * has joined, and a forwarding task per channel that copies published
 * messages into the connection's outbound queue.
 *
 * The session is transport-agnostic. `socket.rs` feeds it text frames and
 * drains the outbound queue into the WebSocket; tests drive it directly.
 */

use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::StreamExt;

use crate::backend::chat::ThreadStore;
use crate::backend::realtime::channels::ThreadChannels;
use crate::backend::realtime::fanout::{authorize_join, deliver};
use crate::shared::{ClientEvent, ServerEvent, ThreadKey};

pub struct RealtimeSession {
    identity: String,
    store: ThreadStore,
    channels: ThreadChannels,
    outbound: mpsc::Sender<ServerEvent>,
    subscriptions: HashMap<ThreadKey, JoinHandle<()>>,
}

impl RealtimeSession {
    /// `identity` is the virtual number of the authenticated caller
    pub fn new(
        identity: impl Into<String>,
        store: ThreadStore,
        channels: ThreadChannels,
        outbound: mpsc::Sender<ServerEvent>,
    ) -> Self {
        Self {
            identity: identity.into(),
            store,
            channels,
            outbound,
            subscriptions: HashMap::new(),
        }
    }

    pub fn is_joined(&self, key: &ThreadKey) -> bool {
        self.subscriptions.contains_key(key)
    }

    /// Handle one inbound text frame.
    ///
    /// Frames that do not decode are logged and ignored.
    pub async fn handle_text(&mut self, text: &str) {
        match ClientEvent::from_json(text) {
            Ok(ClientEvent::Join { channel }) => self.join(channel).await,
            Ok(ClientEvent::Leave { channel }) => self.leave(&channel),
            Ok(ClientEvent::SendMessage(event)) => {
                if let Err(e) = deliver(&self.store, &self.channels, &self.identity, event).await {
                    tracing::warn!("[Realtime] Dropped send-message from {}: {}", self.identity, e);
                }
            }
            Err(e) => {
                tracing::warn!("[Realtime] Ignoring undecodable frame from {}: {}", self.identity, e);
            }
        }
    }

    async fn join(&mut self, channel: String) {
        let reply = match authorize_join(&self.store, &self.identity, &channel).await {
            Ok(key) => {
                if !self.subscriptions.contains_key(&key) {
                    let forwarder = self.forward(&key);
                    self.subscriptions.insert(key, forwarder);
                }
                tracing::info!("[Realtime] {} joined {}", self.identity, channel);
                ServerEvent::Joined { channel }
            }
            Err(rejection) => {
                tracing::warn!("[Realtime] {} refused on {}: {}", self.identity, channel, rejection);
                ServerEvent::JoinRejected {
                    channel,
                    reason: rejection.to_string(),
                }
            }
        };

        // a closed queue means the socket is gone; the session is about to drop
        let _ = self.outbound.send(reply).await;
    }

    fn leave(&mut self, channel: &str) {
        let Some(key) = ThreadKey::parse(channel) else {
            return;
        };
        if let Some(forwarder) = self.subscriptions.remove(&key) {
            forwarder.abort();
            tracing::info!("[Realtime] {} left {}", self.identity, key);
        }
    }

    /// Subscribe now and spawn the task that copies the channel into the
    /// outbound queue. Subscribing before spawning means nothing published
    /// after `join` returns can be missed.
    fn forward(&self, key: &ThreadKey) -> JoinHandle<()> {
        let mut stream = BroadcastStream::new(self.channels.subscribe(key));
        let outbound = self.outbound.clone();
        let identity = self.identity.clone();
        let key = key.clone();

        tokio::spawn(async move {
            while let Some(item) = stream.next().await {
                match item {
                    Ok(message) => {
                        if outbound.send(ServerEvent::ReceiveMessage(message)).await.is_err() {
                            break;
                        }
                    }
                    Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "[Realtime] {} lagged on {}, skipped {} messages",
                            identity,
                            key,
                            skipped
                        );
                    }
                }
            }
        })
    }
}

impl Drop for RealtimeSession {
    fn drop(&mut self) {
        for (_, forwarder) in self.subscriptions.drain() {
            forwarder.abort();
        }
    }
}
