//! Chat API integration tests
//!
//! Run without a database: threads live in the in-memory repository and
//! tokens are minted for arbitrary virtual numbers.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{auth_header, token_for, TestApp};
use crate::{assert_error_message, assert_status};

const ALICE: &str = "11111111111";
const BOB: &str = "22222222222";
const EVE: &str = "33333333333";

async fn send(app: &TestApp, from: &str, to: &str, message: &str) -> axum_test::TestResponse {
    app.server
        .post("/send")
        .add_header("Authorization", auth_header(&token_for(from)))
        .json(&json!({
            "senderVirtualNumber": from,
            "receiverVirtualNumber": to,
            "message": message,
        }))
        .await
}

#[tokio::test]
async fn test_send_and_read_back_thread() {
    let app = TestApp::new();

    let response = send(&app, ALICE, BOB, "hi").await;
    assert_status!(response, StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Message saved");
    assert_eq!(body["chat"]["messages"][0]["message"], "hi");

    assert_status!(send(&app, BOB, ALICE, "yo").await, StatusCode::CREATED);

    // either order addresses the same thread
    let response = app
        .server
        .get(&format!("/chats/{BOB}/{ALICE}"))
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(response, StatusCode::OK);

    let chat = &response.json::<Value>()["chat"];
    assert_eq!(chat["threadKey"], format!("{ALICE}_{BOB}"));
    assert_eq!(chat["participants"], json!([ALICE, BOB]));
    let messages = chat["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["senderVirtualNumber"], ALICE);
    assert_eq!(messages[0]["message"], "hi");
    assert_eq!(messages[1]["senderVirtualNumber"], BOB);
    assert_eq!(messages[1]["message"], "yo");
}

#[tokio::test]
async fn test_messages_are_encrypted_at_rest() {
    let app = TestApp::new();
    send(&app, ALICE, BOB, "secret plans").await;

    let thread = app.state.threads.get_thread(ALICE, BOB).await.unwrap();
    let stored = &thread.messages[0];
    assert_ne!(stored.cipher_text, "secret plans");
    assert_eq!(
        app.state.threads.decrypt(&stored.cipher_text, &stored.iv).unwrap(),
        "secret plans"
    );
}

#[tokio::test]
async fn test_send_requires_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/send")
        .json(&json!({"senderVirtualNumber": ALICE, "receiverVirtualNumber": BOB, "message": "hi"}))
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_error_message!(response, "No token provided");
}

#[tokio::test]
async fn test_send_rejects_bad_token() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/send")
        .add_header("Authorization", auth_header("not-a-jwt"))
        .json(&json!({"senderVirtualNumber": ALICE, "receiverVirtualNumber": BOB, "message": "hi"}))
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_send_missing_fields() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/send")
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .json(&json!({"senderVirtualNumber": ALICE, "message": "hi"}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_message!(response, "Missing required fields");
}

#[tokio::test]
async fn test_cannot_send_as_someone_else() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/send")
        .add_header("Authorization", auth_header(&token_for(EVE)))
        .json(&json!({"senderVirtualNumber": ALICE, "receiverVirtualNumber": BOB, "message": "hi"}))
        .await;

    assert_status!(response, StatusCode::FORBIDDEN);
    assert!(app.state.threads.get_thread(ALICE, BOB).await.is_err());
}

#[tokio::test]
async fn test_outsider_cannot_read_thread() {
    let app = TestApp::new();
    send(&app, ALICE, BOB, "hi").await;

    let response = app
        .server
        .get(&format!("/chats/{ALICE}/{BOB}"))
        .add_header("Authorization", auth_header(&token_for(EVE)))
        .await;

    assert_status!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_thread_is_not_created_by_reads() {
    let app = TestApp::new();

    let response = app
        .server
        .get(&format!("/chats/{ALICE}/{BOB}"))
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .get(&format!("/chats/user/{ALICE}"))
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.json::<Value>()["chats"], json!([]));
}

#[tokio::test]
async fn test_list_threads_for_participant() {
    let app = TestApp::new();
    send(&app, ALICE, BOB, "hi bob").await;
    send(&app, EVE, ALICE, "hi alice").await;
    send(&app, BOB, EVE, "not alice's business").await;

    let response = app
        .server
        .get(&format!("/chats/user/{ALICE}"))
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(response, StatusCode::OK);

    let chats = response.json::<Value>()["chats"].as_array().unwrap().clone();
    assert_eq!(chats.len(), 2);
    for chat in &chats {
        assert!(chat["participants"].as_array().unwrap().contains(&json!(ALICE)));
    }

    let response = app
        .server
        .get(&format!("/chats/user/{BOB}"))
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_save_name_is_per_viewer() {
    let app = TestApp::new();
    send(&app, ALICE, BOB, "hi").await;

    let response = app
        .server
        .post("/users/save-name")
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .json(&json!({"currentUser": ALICE, "targetNumber": BOB, "name": "Bob"}))
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Name saved successfully.");

    let alice_view = app
        .server
        .get("/users/chats")
        .add_query_param("number", ALICE)
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;
    assert_status!(alice_view, StatusCode::OK);
    assert_eq!(alice_view.json::<Value>(), json!([{"number": BOB, "name": "Bob"}]));

    let bob_view = app
        .server
        .get("/users/chats")
        .add_query_param("number", BOB)
        .add_header("Authorization", auth_header(&token_for(BOB)))
        .await;
    assert_eq!(bob_view.json::<Value>(), json!([{"number": ALICE, "name": ALICE}]));
}

#[tokio::test]
async fn test_save_name_without_thread() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/users/save-name")
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .json(&json!({"currentUser": ALICE, "targetNumber": BOB, "name": "Bob"}))
        .await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_error_message!(response, "Chat not found between the users");
    assert!(app.state.threads.get_thread(ALICE, BOB).await.is_err());
}

#[tokio::test]
async fn test_save_name_missing_fields() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/users/save-name")
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .json(&json!({"currentUser": ALICE, "targetNumber": BOB}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_message!(response, "Missing fields in request");
}

#[tokio::test]
async fn test_user_chats_requires_number() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/users/chats")
        .add_header("Authorization", auth_header(&token_for(ALICE)))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_message!(response, "Missing user number");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new();

    let response = app.server.get("/nope").await;

    assert_status!(response, StatusCode::NOT_FOUND);
    assert_error_message!(response, "Route not found");
}
