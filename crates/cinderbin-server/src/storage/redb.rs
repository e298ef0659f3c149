//! Redb-backed durable paste store.
//!
//! Uses Redb's ACID transactions with Copy-on-Write for crash safety. All
//! pastes survive server restarts. A paste spans rows in three tables
//! (record, attachments, expiry index) and every path that touches them runs
//! inside one transaction, so the rows live and die together.

use std::{path::Path, sync::Arc};

use cinderbin_core::{
    AttachmentRecord, PasteRecord, PasteStore, ReadDecision, ReadOutcome, StoreError, Timestamp,
};
use cinderbin_proto::{PasteId, id::ID_LEN};
use redb::{Database, ReadableTable, TableDefinition};

/// Table: pastes
/// Key: paste id raw bytes [8 bytes]
/// Value: CBOR-encoded `PasteRecord`
const PASTES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("pastes");

/// Table: attachments
/// Key: paste id raw bytes [8 bytes]
/// Value: CBOR-encoded `Vec<AttachmentRecord>` (one row per paste)
const ATTACHMENTS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("attachments");

/// Table: expiry index
/// Key: (`expires_at` secs: u64 BE, paste id) [16 bytes]
/// Value: empty marker
///
/// Pastes without an expiry have no row here; the sweeper never sees them.
const EXPIRY: TableDefinition<&[u8], &[u8]> = TableDefinition::new("expiry");

/// Expiry index key length: 8 timestamp bytes + 8 id bytes.
const EXPIRY_KEY_LEN: usize = 8 + ID_LEN;

/// Durable paste store backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
/// Lifecycle reads run in a write transaction even when they end up writing
/// nothing: Redb admits one writer at a time, so two racing reads of a
/// burn-after-reading paste serialize and only the first finds the record.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a Redb database at the given path.
    ///
    /// Creates tables if they don't exist (PASTES, ATTACHMENTS, EXPIRY).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = Database::create(path.as_ref()).map_err(|e| StoreError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(PASTES).map_err(|e| StoreError::Io(e.to_string()))?;
            let _ = txn.open_table(ATTACHMENTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let _ = txn.open_table(EXPIRY).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl PasteStore for RedbStore {
    fn put(&self, record: &PasteRecord, files: &[AttachmentRecord]) -> Result<(), StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;

        {
            let mut pastes = txn.open_table(PASTES).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut attachments =
                txn.open_table(ATTACHMENTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut expiry = txn.open_table(EXPIRY).map_err(|e| StoreError::Io(e.to_string()))?;

            let key = *record.id.as_bytes();

            if pastes
                .get(key.as_slice())
                .map_err(|e| StoreError::Io(e.to_string()))?
                .is_some()
            {
                return Err(StoreError::Duplicate { id: record.id });
            }

            let mut bytes = Vec::new();
            ciborium::into_writer(record, &mut bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            pastes
                .insert(key.as_slice(), bytes.as_slice())
                .map_err(|e| StoreError::Io(e.to_string()))?;

            let mut bytes = Vec::new();
            ciborium::into_writer(files, &mut bytes)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            attachments
                .insert(key.as_slice(), bytes.as_slice())
                .map_err(|e| StoreError::Io(e.to_string()))?;

            if let Some(at) = record.expires_at {
                let ekey = encode_expiry_key(at, record.id);
                let marker: &[u8] = &[];
                expiry
                    .insert(ekey.as_slice(), marker)
                    .map_err(|e| StoreError::Io(e.to_string()))?;
            }
        }

        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(())
    }

    fn get(
        &self,
        id: &PasteId,
    ) -> Result<Option<(PasteRecord, Vec<AttachmentRecord>)>, StoreError> {
        let txn = self.db.begin_read().map_err(|e| StoreError::Io(e.to_string()))?;

        let pastes = txn.open_table(PASTES).map_err(|e| StoreError::Io(e.to_string()))?;
        let Some(record) = load_record(&pastes, id)? else {
            return Ok(None);
        };

        let attachments = txn.open_table(ATTACHMENTS).map_err(|e| StoreError::Io(e.to_string()))?;
        let files = load_attachments(&attachments, id)?;

        Ok(Some((record, files)))
    }

    fn read_and_maybe_consume(
        &self,
        id: &PasteId,
        now: Timestamp,
    ) -> Result<ReadOutcome, StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;

        let outcome = {
            let mut pastes = txn.open_table(PASTES).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut attachments =
                txn.open_table(ATTACHMENTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut expiry = txn.open_table(EXPIRY).map_err(|e| StoreError::Io(e.to_string()))?;

            let Some(record) = load_record(&pastes, id)? else {
                // Nothing read, nothing written; the transaction aborts on drop.
                return Ok(ReadOutcome::Missing);
            };

            match ReadDecision::for_record(&record, now) {
                ReadDecision::Serve => {
                    let files = load_attachments(&attachments, id)?;
                    ReadOutcome::Open { record, attachments: files }
                },
                ReadDecision::ServeAndBurn => {
                    let files = load_attachments(&attachments, id)?;
                    remove_paste(&mut pastes, &mut attachments, &mut expiry, &record)?;
                    ReadOutcome::Consumed { record, attachments: files }
                },
                ReadDecision::ExpireAndPurge => {
                    remove_paste(&mut pastes, &mut attachments, &mut expiry, &record)?;
                    ReadOutcome::Missing
                },
            }
        };

        // Consumed data is handed out only after the deletion is durable. If
        // the commit fails the caller gets an error, not a second-servable
        // burn paste.
        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(outcome)
    }

    fn delete_if_present(&self, id: &PasteId) -> Result<bool, StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;

        let removed = {
            let mut pastes = txn.open_table(PASTES).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut attachments =
                txn.open_table(ATTACHMENTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut expiry = txn.open_table(EXPIRY).map_err(|e| StoreError::Io(e.to_string()))?;

            match load_record(&pastes, id)? {
                Some(record) => remove_paste(&mut pastes, &mut attachments, &mut expiry, &record)?,
                None => false,
            }
        };

        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(removed)
    }

    fn sweep_expired(&self, now: Timestamp) -> Result<u64, StoreError> {
        let txn = self.db.begin_write().map_err(|e| StoreError::Io(e.to_string()))?;

        let swept = {
            let mut pastes = txn.open_table(PASTES).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut attachments =
                txn.open_table(ATTACHMENTS).map_err(|e| StoreError::Io(e.to_string()))?;
            let mut expiry = txn.open_table(EXPIRY).map_err(|e| StoreError::Io(e.to_string()))?;

            // Everything due at `now` sorts at or before (now, max id).
            let end_key = encode_expiry_key(now, PasteId::from_bytes([0xFF; ID_LEN]));

            let mut due: Vec<(Timestamp, PasteId)> = Vec::new();
            {
                let rows = expiry
                    .range(..=end_key.as_slice())
                    .map_err(|e| StoreError::Io(e.to_string()))?;
                for row in rows {
                    let (key, _) = row.map_err(|e| StoreError::Io(e.to_string()))?;
                    due.push(decode_expiry_key(key.value())?);
                }
            }

            let mut swept = 0u64;
            for (at, id) in due {
                let ekey = encode_expiry_key(at, id);
                expiry
                    .remove(ekey.as_slice())
                    .map_err(|e| StoreError::Io(e.to_string()))?;

                let removed = pastes
                    .remove(id.as_bytes().as_slice())
                    .map_err(|e| StoreError::Io(e.to_string()))?
                    .is_some();
                attachments
                    .remove(id.as_bytes().as_slice())
                    .map_err(|e| StoreError::Io(e.to_string()))?;

                if removed {
                    swept += 1;
                }
            }

            swept
        };

        txn.commit().map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(swept)
    }
}

/// Load and decode a paste record. `None` if the row is absent.
fn load_record<T: ReadableTable<&'static [u8], &'static [u8]>>(
    table: &T,
    id: &PasteId,
) -> Result<Option<PasteRecord>, StoreError> {
    match table.get(id.as_bytes().as_slice()).map_err(|e| StoreError::Io(e.to_string()))? {
        Some(value) => {
            let record: PasteRecord = ciborium::from_reader(value.value())
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            Ok(Some(record))
        },
        None => Ok(None),
    }
}

/// Load and decode a paste's attachments. An absent row means none.
fn load_attachments<T: ReadableTable<&'static [u8], &'static [u8]>>(
    table: &T,
    id: &PasteId,
) -> Result<Vec<AttachmentRecord>, StoreError> {
    match table.get(id.as_bytes().as_slice()).map_err(|e| StoreError::Io(e.to_string()))? {
        Some(value) => ciborium::from_reader(value.value())
            .map_err(|e| StoreError::Serialization(e.to_string())),
        None => Ok(Vec::new()),
    }
}

/// Remove a paste's rows from all three tables.
///
/// Returns whether the record row existed. Must run inside the caller's
/// write transaction so the cascade is atomic.
fn remove_paste(
    pastes: &mut redb::Table<'_, &'static [u8], &'static [u8]>,
    attachments: &mut redb::Table<'_, &'static [u8], &'static [u8]>,
    expiry: &mut redb::Table<'_, &'static [u8], &'static [u8]>,
    record: &PasteRecord,
) -> Result<bool, StoreError> {
    let key = *record.id.as_bytes();

    let removed = pastes
        .remove(key.as_slice())
        .map_err(|e| StoreError::Io(e.to_string()))?
        .is_some();

    attachments.remove(key.as_slice()).map_err(|e| StoreError::Io(e.to_string()))?;

    if let Some(at) = record.expires_at {
        let ekey = encode_expiry_key(at, record.id);
        expiry.remove(ekey.as_slice()).map_err(|e| StoreError::Io(e.to_string()))?;
    }

    Ok(removed)
}

/// Encode (`expires_at`, id) as a 16-byte big-endian key.
///
/// Layout: [`expires_at` secs: 8 bytes BE][id: 8 bytes]
/// Lexicographic order equals expiry order, so one range scan finds
/// everything due.
fn encode_expiry_key(at: Timestamp, id: PasteId) -> [u8; EXPIRY_KEY_LEN] {
    let mut key = [0u8; EXPIRY_KEY_LEN];
    key[..8].copy_from_slice(&at.as_secs().to_be_bytes());
    key[8..].copy_from_slice(id.as_bytes());
    key
}

/// Decode an expiry index key back to (`expires_at`, id).
fn decode_expiry_key(key: &[u8]) -> Result<(Timestamp, PasteId), StoreError> {
    if key.len() != EXPIRY_KEY_LEN {
        return Err(StoreError::Serialization(format!(
            "expiry key is {} bytes, want {EXPIRY_KEY_LEN}",
            key.len()
        )));
    }

    let mut secs = [0u8; 8];
    secs.copy_from_slice(&key[..8]);
    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(&key[8..]);

    Ok((Timestamp::from_secs(u64::from_be_bytes(secs)), PasteId::from_bytes(id)))
}
