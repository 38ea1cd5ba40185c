use super::*;

use crate::state::test_helpers::temp_messages_file;

#[tokio::test]
async fn append_keeps_only_most_recent_cap() {
    let path = temp_messages_file();
    let store = MessageStore::open(&path, 10).unwrap();

    for i in 0..12 {
        store.append("friend", &format!("hello {i}")).await.unwrap();
    }

    let all = store.all().await;
    assert_eq!(all.len(), 10);
    assert_eq!(all[0].message, "hello 2");
    assert_eq!(all[9].message, "hello 11");
    // Insertion order preserved across the whole window.
    for (idx, record) in all.iter().enumerate() {
        assert_eq!(record.message, format!("hello {}", idx + 2));
    }

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn blank_username_becomes_anonymous() {
    let path = temp_messages_file();
    let store = MessageStore::open(&path, 10).unwrap();

    let record = store.append("   ", "hi there").await.unwrap();
    assert_eq!(record.username, "Anonymous");
    assert_eq!(record.message, "hi there");
    assert_eq!(record.id.len(), 8);
    assert!(record.unix_time > 0);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let path = temp_messages_file();
    let store = MessageStore::open(&path, 10).unwrap();

    assert!(matches!(store.append("friend", "").await, Err(StoreError::EmptyMessage)));
    assert!(matches!(store.append("friend", "   \n").await, Err(StoreError::EmptyMessage)));
    assert!(store.all().await.is_empty());

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn latest_returns_newest() {
    let path = temp_messages_file();
    let store = MessageStore::open(&path, 10).unwrap();

    assert!(store.latest().await.is_none());
    store.append("a", "first").await.unwrap();
    store.append("b", "second").await.unwrap();
    assert_eq!(store.latest().await.unwrap().message, "second");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn reload_round_trips_the_file() {
    let path = temp_messages_file();
    {
        let store = MessageStore::open(&path, 10).unwrap();
        store.append("a", "one").await.unwrap();
        store.append("b", "two").await.unwrap();
    }

    let reopened = MessageStore::open(&path, 10).unwrap();
    let all = reopened.all().await;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].message, "one");
    assert_eq!(all[1].username, "b");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn reload_truncates_oversized_file_to_cap() {
    let path = temp_messages_file();
    {
        let store = MessageStore::open(&path, 20).unwrap();
        for i in 0..15 {
            store.append("friend", &format!("msg {i}")).await.unwrap();
        }
    }

    // Reopen with the default cap: only the newest ten survive.
    let reopened = MessageStore::open(&path, DEFAULT_MESSAGE_CAP).unwrap();
    let all = reopened.all().await;
    assert_eq!(all.len(), 10);
    assert_eq!(all[0].message, "msg 5");

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn corrupt_file_starts_empty_and_recovers() {
    let path = temp_messages_file();
    std::fs::write(&path, "definitely not json").unwrap();

    let store = MessageStore::open(&path, 10).unwrap();
    assert!(store.all().await.is_empty());

    store.append("friend", "fresh start").await.unwrap();
    let reopened = MessageStore::open(&path, 10).unwrap();
    assert_eq!(reopened.all().await.len(), 1);

    let _ = std::fs::remove_file(&path);
}
