//! Concurrent readers against a burn-after-reading paste
//!
//! Whatever the backend, exactly one reader may walk away with the paste;
//! everyone else sees nothing. These tests hammer `read_and_maybe_consume`
//! from many blocking-pool threads at once and count the outcomes.

use cinderbin_core::{PasteRecord, PasteStore, ReadOutcome, Timestamp};
use cinderbin_server::storage::{MemoryStore, RedbStore};
use tokio::task::JoinSet;

const READERS: usize = 32;
const BURN_ID: &str = "deadbeef00112233";

fn burn_record() -> PasteRecord {
    PasteRecord {
        id: BURN_ID.parse().expect("valid test id"),
        encrypted_content: "Y2lwaGVydGV4dA==".to_string(),
        nonce: "bm9uY2U=".to_string(),
        burn_after_reading: true,
        expires_at: None,
        created_at: Timestamp::from_secs(1_000),
    }
}

/// Spawn `READERS` concurrent reads of the burn paste and count what each saw.
async fn hammer<S: PasteStore>(store: S) -> (usize, usize) {
    let id = BURN_ID.parse().expect("valid test id");

    let mut readers = JoinSet::new();
    for _ in 0..READERS {
        let store = store.clone();
        readers.spawn(async move {
            tokio::task::spawn_blocking(move || {
                store.read_and_maybe_consume(&id, Timestamp::from_secs(2_000))
            })
            .await
            .expect("reader thread panicked")
        });
    }

    let mut consumed = 0;
    let mut missing = 0;
    while let Some(joined) = readers.join_next().await {
        match joined.expect("reader task panicked").expect("store failed") {
            ReadOutcome::Consumed { record, .. } => {
                assert_eq!(record.id, id);
                consumed += 1;
            },
            ReadOutcome::Missing => missing += 1,
            ReadOutcome::Open { .. } => panic!("burn paste was served without burning"),
        }
    }
    (consumed, missing)
}

#[tokio::test]
async fn test_memory_store_burns_exactly_once_under_contention() {
    let store = MemoryStore::new();
    store.put(&burn_record(), &[]).expect("put failed");

    let (consumed, missing) = hammer(store.clone()).await;

    assert_eq!(consumed, 1, "exactly one reader may consume the paste");
    assert_eq!(missing, READERS - 1);
    assert_eq!(store.paste_count(), 0, "the paste must be gone afterwards");
}

#[tokio::test]
async fn test_redb_store_burns_exactly_once_under_contention() {
    let dir = tempfile::tempdir().expect("tempdir failed");
    let store = RedbStore::open(dir.path().join("race.redb")).expect("open failed");
    store.put(&burn_record(), &[]).expect("put failed");

    let (consumed, missing) = hammer(store.clone()).await;

    assert_eq!(consumed, 1, "exactly one reader may consume the paste");
    assert_eq!(missing, READERS - 1);

    let id = BURN_ID.parse().expect("valid test id");
    assert!(store.get(&id).expect("get failed").is_none(), "the paste must be gone afterwards");
}

#[tokio::test]
async fn test_concurrent_deletes_resolve_by_idempotence() {
    let store = MemoryStore::new();
    store.put(&burn_record(), &[]).expect("put failed");

    let id = BURN_ID.parse().expect("valid test id");
    let mut deleters = JoinSet::new();
    for _ in 0..READERS {
        let store = store.clone();
        deleters.spawn(async move {
            tokio::task::spawn_blocking(move || store.delete_if_present(&id))
                .await
                .expect("deleter thread panicked")
        });
    }

    let mut removed = 0;
    while let Some(joined) = deleters.join_next().await {
        if joined.expect("deleter task panicked").expect("store failed") {
            removed += 1;
        }
    }

    assert_eq!(removed, 1, "only the first delete finds the paste");
    assert_eq!(store.paste_count(), 0);
}
