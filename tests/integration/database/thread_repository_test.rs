//! `PgThreadRepository` behind the `ThreadStore`

use pretty_assertions::assert_eq;
use serial_test::serial;
use std::sync::Arc;

use vnchat::backend::chat::{PgThreadRepository, ThreadError, ThreadStore};
use vnchat::backend::crypto::MessageCodec;

use crate::common::{TestDatabase, TEST_ENCRYPTION_KEY};

async fn store() -> (TestDatabase, ThreadStore) {
    let db = TestDatabase::new().await;
    db.cleanup().await.unwrap();
    let store = ThreadStore::new(
        Arc::new(PgThreadRepository::new(db.pool().clone())),
        Arc::new(MessageCodec::new(TEST_ENCRYPTION_KEY)),
    );
    (db, store)
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_append_in_both_directions_uses_one_thread() {
    let (db, store) = store().await;

    store.append_message("111", "222", "111", "hi").await.unwrap();
    let thread = store.append_message("222", "111", "222", "yo").await.unwrap();

    assert_eq!(thread.key.as_str(), "111_222");
    assert_eq!(thread.participants, ["111".to_string(), "222".to_string()]);
    let senders: Vec<&str> = thread.messages.iter().map(|m| m.sender.as_str()).collect();
    assert_eq!(senders, ["111", "222"]);
    assert!(thread.messages[0].sent_at <= thread.messages[1].sent_at);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_threads")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_first_messages_create_one_thread() {
    let (db, store) = store().await;

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let (from, to) = if i % 2 == 0 { ("111", "222") } else { ("222", "111") };
                store.append_message(from, to, from, &format!("msg {i}")).await
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let thread = store.get_thread("111", "222").await.unwrap();
    assert_eq!(thread.messages.len(), 8);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_threads")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_overlay_and_listing() {
    let (_db, store) = store().await;

    assert!(matches!(
        store.set_display_name("111", "222", "Bob").await,
        Err(ThreadError::NotFound { .. })
    ));

    store.append_message("111", "222", "111", "hi").await.unwrap();
    store.append_message("111", "333", "111", "hey").await.unwrap();
    store.set_display_name("111", "222", "Bob").await.unwrap();

    let contacts = store.contacts_for("111").await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert!(contacts.iter().any(|c| c.number == "222" && c.name == "Bob"));
    assert!(contacts.iter().any(|c| c.number == "333" && c.name == "333"));

    let bob_view = store.contacts_for("222").await.unwrap();
    assert_eq!(bob_view[0].name, "111");

    // most recently updated first: the overlay write touched 111_222
    let threads = store.list_threads_for_participant("111").await.unwrap();
    assert_eq!(threads[0].key.as_str(), "111_222");
}
