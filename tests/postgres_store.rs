mod common;

use pdfchat::db::{ConversationStore, PgConversationStore, StoreError};
use pdfchat::models::{MessageEntry, NewConversation, DEFAULT_CONVERSATION_NAME};

fn entry(n: usize) -> MessageEntry {
    MessageEntry {
        id: format!("id{:06}", n),
        question: format!("question {}", n),
        answer: format!("answer {}", n),
    }
}

#[tokio::test]
async fn insert_fetch_and_append() {
    let pool = match common::test_database().await {
        Some(pool) => pool,
        None => return,
    };
    let store = PgConversationStore::new(pool);

    let created = store
        .insert(NewConversation::first_turn("u1", entry(0)))
        .await
        .unwrap();
    for n in 1..=3 {
        store.append_message(&created.id, entry(n)).await.unwrap();
    }

    let stored = store.fetch(&created.id).await.unwrap().unwrap();
    let expected: Vec<_> = (0..=3).map(entry).collect();
    assert_eq!(stored.messages, expected);
    assert!(stored.updated_at >= created.updated_at);

    let list = store.list_by_user("u1").await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, created.id);
}

#[tokio::test]
async fn concurrent_appends_are_not_lost() {
    let pool = match common::test_database().await {
        Some(pool) => pool,
        None => return,
    };
    let store = PgConversationStore::new(pool);
    let created = store
        .insert(NewConversation::first_turn("u1", entry(0)))
        .await
        .unwrap();

    let appends = (1..=10).map(|n| store.append_message(&created.id, entry(n)));
    for result in futures::future::join_all(appends).await {
        result.unwrap();
    }

    let stored = store.fetch(&created.id).await.unwrap().unwrap();
    assert_eq!(stored.messages.len(), 11);
}

#[tokio::test]
async fn append_to_unknown_conversation_fails() {
    let pool = match common::test_database().await {
        Some(pool) => pool,
        None => return,
    };
    let store = PgConversationStore::new(pool);

    let err = store.append_message("missing", entry(0)).await.unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn upsert_pdf_creates_then_updates() {
    let pool = match common::test_database().await {
        Some(pool) => pool,
        None => return,
    };
    let store = PgConversationStore::new(pool);

    let created = store.upsert_pdf("c1", "a.pdf", "Alpha").await.unwrap();
    assert_eq!(created.name, DEFAULT_CONVERSATION_NAME);
    assert!(created.messages.is_empty());

    let updated = store.upsert_pdf("c1", "b.pdf", "Beta").await.unwrap();
    assert_eq!(updated.pdf_name.as_deref(), Some("b.pdf"));
    assert_eq!(updated.pdf_text.as_deref(), Some("Beta"));
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn duplicate_insert_is_rejected() {
    let pool = match common::test_database().await {
        Some(pool) => pool,
        None => return,
    };
    let store = PgConversationStore::new(pool);
    let mut conversation = NewConversation::first_turn("u1", entry(0));
    conversation.id = "fixed".to_string();

    store.insert(conversation.clone()).await.unwrap();
    let err = store.insert(conversation).await.unwrap_err();

    assert!(matches!(err, StoreError::AlreadyExists(_)));
}
