//! Call log API integration tests

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;

use crate::common::{TestApp, TestDatabase};
use crate::{assert_error_message, assert_status};

#[tokio::test]
async fn test_save_call_validation_comes_first() {
    let app = TestApp::new();

    let response = app.server.post("/calls").json(&json!({"phoneNumber": "5550001111"})).await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_error_message!(response, "Phone number and call type are required");
}

#[tokio::test]
async fn test_unknown_call_type() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/calls")
        .json(&json!({"phoneNumber": "5550001111", "callType": "missed"}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_call_history_newest_first() {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();
    let app = TestApp::with_pool(Some(db.pool().clone()));

    for call_type in ["incoming", "outgoing", "incoming"] {
        let response = app
            .server
            .post("/calls")
            .json(&json!({"phoneNumber": "5550001111", "callType": call_type}))
            .await;
        assert_status!(response, StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["message"], "Call saved successfully");
    }

    let response = app.server.get("/calls/5550001111").await;
    assert_status!(response, StatusCode::OK);

    let calls = response.json::<Vec<Value>>();
    assert_eq!(calls.len(), 3);
    let timestamps: Vec<DateTime<Utc>> = calls
        .iter()
        .map(|c| c["timestamp"].as_str().unwrap().parse().unwrap())
        .collect();
    let mut sorted = timestamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted);

    let response = app.server.get("/calls/5559999999").await;
    assert_eq!(response.json::<Vec<Value>>(), Vec::<Value>::new());
}
