//! WebSocket integration tests
//!
//! These run the router over a real socket so the upgrade happens.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::assert_status;
use crate::common::{auth_header, token_for, TestApp};

const ALICE: &str = "11111111111";
const BOB: &str = "22222222222";
const EVE: &str = "33333333333";

async fn connect(app: &TestApp, identity: &str) -> axum_test::TestWebSocket {
    app.server
        .get_websocket("/ws")
        .add_query_param("token", token_for(identity))
        .await
        .into_websocket()
        .await
}

fn join(channel: &str) -> Value {
    json!({"event": "join", "data": {"channel": channel}})
}

#[tokio::test]
async fn test_upgrade_requires_token() {
    let app = TestApp::with_http_transport();

    let response = app.server.get_websocket("/ws").await;
    assert_status!(response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get_websocket("/ws")
        .add_query_param("token", "garbage")
        .await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upgrade_accepts_bearer_header() {
    let app = TestApp::with_http_transport();

    let response = app
        .server
        .get_websocket("/ws")
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(response, StatusCode::SWITCHING_PROTOCOLS);
}

#[tokio::test]
async fn test_send_message_fans_out_to_channel() {
    let app = TestApp::with_http_transport();
    let channel = format!("{ALICE}_{BOB}");

    let mut alice = connect(&app, ALICE).await;
    let mut bob = connect(&app, BOB).await;

    alice.send_json(&join(&channel)).await;
    bob.send_json(&join(&channel)).await;
    let joined = json!({"event": "joined", "data": {"channel": channel}});
    assert_eq!(alice.receive_json::<Value>().await, joined);
    assert_eq!(bob.receive_json::<Value>().await, joined);

    alice
        .send_json(&json!({
            "event": "send-message",
            "data": {"sender": ALICE, "receiver": BOB, "message": "hi"},
        }))
        .await;

    for socket in [&mut alice, &mut bob] {
        let frame: Value = socket.receive_json().await;
        assert_eq!(frame["event"], "receive-message");
        assert_eq!(frame["data"]["senderIdentifier"], ALICE);
        assert_eq!(frame["data"]["message"], "hi");
        assert!(frame["data"]["timestamp"].is_string());
    }

    // stored through the same path as POST /send
    let thread = app.state.threads.get_thread(BOB, ALICE).await.unwrap();
    assert_eq!(thread.messages.len(), 1);
    assert_eq!(thread.messages[0].sender, ALICE);
}

#[tokio::test]
async fn test_outsider_join_is_rejected() {
    let app = TestApp::with_http_transport();
    let channel = format!("{ALICE}_{BOB}");

    let mut eve = connect(&app, EVE).await;
    eve.send_json(&join(&channel)).await;

    let frame: Value = eve.receive_json().await;
    assert_eq!(frame["event"], "join-rejected");
    assert_eq!(frame["data"]["channel"], channel.as_str());
}
