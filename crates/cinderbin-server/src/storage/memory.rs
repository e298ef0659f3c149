use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use cinderbin_core::{
    AttachmentRecord, PasteRecord, PasteStore, ReadDecision, ReadOutcome, StoreError, Timestamp,
    is_expired,
};
use cinderbin_proto::PasteId;

/// In-memory paste store.
///
/// A single `HashMap` behind one Mutex; every trait method takes the lock
/// once and finishes all of its work before releasing it, which is what
/// makes `read_and_maybe_consume` atomic. Uses `lock().expect()` which will
/// panic if the mutex is poisoned - acceptable for tests and for ephemeral
/// deployments that lose everything on restart anyway.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

struct MemoryStoreInner {
    /// Paste records with their attachments, keyed by ID
    pastes: HashMap<PasteId, (PasteRecord, Vec<AttachmentRecord>)>,
}

impl MemoryStore {
    /// Create a new empty `MemoryStore`
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryStoreInner { pastes: HashMap::new() })) }
    }

    /// Number of stored pastes.
    ///
    /// Useful for debugging and testing.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned (a thread panicked while
    /// holding the lock).
    #[allow(clippy::expect_used)]
    pub fn paste_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").pastes.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PasteStore for MemoryStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn put(
        &self,
        record: &PasteRecord,
        attachments: &[AttachmentRecord],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");

        if inner.pastes.contains_key(&record.id) {
            return Err(StoreError::Duplicate { id: record.id });
        }

        inner.pastes.insert(record.id, (record.clone(), attachments.to_vec()));

        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn get(
        &self,
        id: &PasteId,
    ) -> Result<Option<(PasteRecord, Vec<AttachmentRecord>)>, StoreError> {
        let inner = self.inner.lock().expect("Mutex poisoned");

        Ok(inner.pastes.get(id).cloned())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn read_and_maybe_consume(
        &self,
        id: &PasteId,
        now: Timestamp,
    ) -> Result<ReadOutcome, StoreError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");

        let decision = match inner.pastes.get(id) {
            Some((record, _)) => ReadDecision::for_record(record, now),
            None => return Ok(ReadOutcome::Missing),
        };

        match decision {
            ReadDecision::Serve => {
                let Some((record, attachments)) = inner.pastes.get(id) else {
                    unreachable!("entry checked above under the same lock");
                };
                Ok(ReadOutcome::Open { record: record.clone(), attachments: attachments.clone() })
            },
            ReadDecision::ServeAndBurn => {
                let Some((record, attachments)) = inner.pastes.remove(id) else {
                    unreachable!("entry checked above under the same lock");
                };
                Ok(ReadOutcome::Consumed { record, attachments })
            },
            ReadDecision::ExpireAndPurge => {
                inner.pastes.remove(id);
                Ok(ReadOutcome::Missing)
            },
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn delete_if_present(&self, id: &PasteId) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");

        Ok(inner.pastes.remove(id).is_some())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    fn sweep_expired(&self, now: Timestamp) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().expect("Mutex poisoned");

        let before = inner.pastes.len();
        inner.pastes.retain(|_, (record, _)| !is_expired(record.expires_at, now));

        Ok((before - inner.pastes.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_record(id_hex: &str, burn: bool, expires_at: Option<u64>) -> PasteRecord {
        PasteRecord {
            id: id_hex.parse().expect("valid test id"),
            encrypted_content: "Y2lwaGVydGV4dA==".to_string(),
            nonce: "bm9uY2U=".to_string(),
            burn_after_reading: burn,
            expires_at: expires_at.map(Timestamp::from_secs),
            created_at: Timestamp::from_secs(1_000),
        }
    }

    fn test_attachment() -> AttachmentRecord {
        AttachmentRecord {
            encrypted_data: "ZmlsZWRhdGE=".to_string(),
            data_nonce: "aXYx".to_string(),
            encrypted_filename: "bmFtZQ==".to_string(),
            filename_nonce: "aXYy".to_string(),
            plaintext_size: 2_048,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert_eq!(store.paste_count(), 0);
    }

    #[test]
    fn test_put_and_get_roundtrip() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", false, Some(2_000));

        store.put(&record, &[test_attachment()]).expect("put failed");

        let (loaded, attachments) =
            store.get(&record.id).expect("get failed").expect("paste should exist");
        assert_eq!(loaded, record);
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0].plaintext_size, 2_048);
    }

    #[test]
    fn test_put_duplicate_rejected() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", false, None);

        store.put(&record, &[]).expect("put failed");

        let mut clash = test_record("00000000000000aa", true, None);
        clash.encrypted_content = "b3RoZXI=".to_string();

        match store.put(&clash, &[]) {
            Err(StoreError::Duplicate { id }) => assert_eq!(id, record.id),
            other => panic!("expected Duplicate, got {other:?}"),
        }

        // The original record is untouched
        let (loaded, _) = store.get(&record.id).unwrap().unwrap();
        assert_eq!(loaded.encrypted_content, record.encrypted_content);
    }

    #[test]
    fn test_read_missing_paste() {
        let store = MemoryStore::new();
        let id: PasteId = "00000000000000aa".parse().unwrap();

        let outcome = store.read_and_maybe_consume(&id, Timestamp::from_secs(1_500)).unwrap();
        assert_eq!(outcome, ReadOutcome::Missing);
    }

    #[test]
    fn test_read_active_paste_retains_it() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", false, Some(2_000));
        store.put(&record, &[test_attachment()]).unwrap();

        let outcome =
            store.read_and_maybe_consume(&record.id, Timestamp::from_secs(1_500)).unwrap();
        match outcome {
            ReadOutcome::Open { record: served, attachments } => {
                assert_eq!(served, record);
                assert_eq!(attachments.len(), 1);
            },
            other => panic!("expected Open, got {other:?}"),
        }

        // Still there for the next reader
        assert!(store.get(&record.id).unwrap().is_some());
    }

    #[test]
    fn test_read_burn_paste_consumes_it() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", true, None);
        store.put(&record, &[test_attachment()]).unwrap();

        let first = store.read_and_maybe_consume(&record.id, Timestamp::from_secs(1_500)).unwrap();
        match first {
            ReadOutcome::Consumed { record: served, attachments } => {
                assert_eq!(served, record);
                assert_eq!(attachments.len(), 1);
            },
            other => panic!("expected Consumed, got {other:?}"),
        }

        let second = store.read_and_maybe_consume(&record.id, Timestamp::from_secs(1_500)).unwrap();
        assert_eq!(second, ReadOutcome::Missing);
        assert_eq!(store.paste_count(), 0);
    }

    #[test]
    fn test_read_expired_paste_purges_it() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", false, Some(2_000));
        store.put(&record, &[]).unwrap();

        let outcome =
            store.read_and_maybe_consume(&record.id, Timestamp::from_secs(2_000)).unwrap();
        assert_eq!(outcome, ReadOutcome::Missing);
        assert_eq!(store.paste_count(), 0);
    }

    #[test]
    fn test_expired_burn_paste_is_not_served() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", true, Some(2_000));
        store.put(&record, &[]).unwrap();

        let outcome =
            store.read_and_maybe_consume(&record.id, Timestamp::from_secs(3_000)).unwrap();
        assert_eq!(outcome, ReadOutcome::Missing);
    }

    #[test]
    fn test_delete_if_present_is_idempotent() {
        let store = MemoryStore::new();
        let record = test_record("00000000000000aa", false, None);
        store.put(&record, &[]).unwrap();

        assert!(store.delete_if_present(&record.id).unwrap());
        assert!(!store.delete_if_present(&record.id).unwrap());
        assert!(store.get(&record.id).unwrap().is_none());
    }

    #[test]
    fn test_sweep_removes_only_expired() {
        let store = MemoryStore::new();
        store.put(&test_record("00000000000000a1", false, Some(1_500)), &[]).unwrap();
        store.put(&test_record("00000000000000a2", false, Some(9_000)), &[]).unwrap();
        store.put(&test_record("00000000000000a3", false, None), &[]).unwrap();

        let swept = store.sweep_expired(Timestamp::from_secs(2_000)).unwrap();
        assert_eq!(swept, 1);
        assert_eq!(store.paste_count(), 2);

        let survivor: PasteId = "00000000000000a2".parse().unwrap();
        assert!(store.get(&survivor).unwrap().is_some());
    }

    #[test]
    fn test_sweep_on_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(store.sweep_expired(Timestamp::from_secs(2_000)).unwrap(), 0);
    }
}
