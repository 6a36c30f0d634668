/**
 * WebSocket Endpoint
 *
 * GET /ws upgrades to a WebSocket carrying the frames defined in
 * `shared::event`. The caller authenticates during the handshake, with
 * either a `token` query parameter (browsers cannot set headers on a
 * WebSocket request) or an `Authorization: Bearer` header.
 *
 * Each connection runs two tasks: one drains the session's outbound queue
 * into the socket, the other feeds inbound text frames to the session. When
 * either finishes the other is aborted, which drops the session and its
 * channel subscriptions.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::HeaderMap,
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::backend::error::BackendError;
use crate::backend::middleware::{authenticate, bearer_token, AuthenticatedUser};
use crate::backend::realtime::session::RealtimeSession;
use crate::backend::server::state::AppState;
use crate::shared::ServerEvent;

/// Frames queued per connection before a slow socket applies backpressure
const OUTBOUND_BUFFER: usize = 64;

#[derive(Debug, Default, Deserialize)]
pub struct WsAuthQuery {
    pub token: Option<String>,
}

/// WebSocket upgrade handler
///
/// # Errors
///
/// * `401 Unauthorized` - no token, or the token does not verify
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsAuthQuery>,
    headers: HeaderMap,
) -> Result<Response, BackendError> {
    let token = query
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(&headers))
        .ok_or_else(|| BackendError::unauthorized("No token provided"))?;

    let user = authenticate(&state, token).await?;
    tracing::info!("[Realtime] Connection from {}", user.virtual_number);

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user)))
}

async fn handle_socket(socket: WebSocket, state: AppState, user: AuthenticatedUser) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::channel::<ServerEvent>(OUTBOUND_BUFFER);

    let identity = user.virtual_number.clone();
    let mut session = RealtimeSession::new(
        user.virtual_number,
        state.threads.clone(),
        state.channels.clone(),
        out_tx,
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = out_rx.recv().await {
            let text = match event.to_json() {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("[Realtime] Failed to encode frame: {}", e);
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = ws_rx.next().await {
            match frame {
                Message::Text(text) => session.handle_text(text.as_str()).await,
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::info!("[Realtime] Connection from {} closed", identity);
}
