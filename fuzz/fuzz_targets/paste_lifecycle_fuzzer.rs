//! Fuzz target for the paste lifecycle against an in-memory store
//!
//! Drives MemoryStore through arbitrary interleavings of puts, reads,
//! deletes, sweeps and time jumps, checking every outcome against a naive
//! model of what the store should contain.
//!
//! # Invariants
//!
//! - A burn paste is consumed by exactly one read, then gone
//! - An expired paste is never served, whoever touches it first purges it
//! - Re-putting a live ID fails with Duplicate and changes nothing
//! - Sweep removes exactly the expired rows and reports their count
//! - The store NEVER panics, whatever the interleaving

#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use cinderbin_core::{PasteRecord, PasteStore, ReadOutcome, StoreError, Timestamp};
use cinderbin_proto::PasteId;
use cinderbin_server::storage::MemoryStore;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
struct LifecycleScenario {
    operations: Vec<LifecycleOperation>,
}

#[derive(Debug, Clone, Arbitrary)]
enum LifecycleOperation {
    /// Store a paste; a small ID space forces Duplicate collisions
    Put { id: u8, burn: bool, ttl_secs: Option<u8> },
    /// Lifecycle read, the one readers go through
    Read { id: u8 },
    /// Inspection read with no lifecycle effects
    Get { id: u8 },
    /// Explicit delete
    Delete { id: u8 },
    /// What the background sweeper does
    Sweep,
    /// Jump the clock forward
    AdvanceTime { secs: u8 },
}

/// What the model remembers about a stored row.
#[derive(Debug, Clone, Copy)]
struct ModelRow {
    burn: bool,
    expires_at: Option<u64>,
}

impl ModelRow {
    fn expired(&self, now: u64) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

fn paste_id(raw: u8) -> PasteId {
    PasteId::from_bytes([raw, 0, 0, 0, 0, 0, 0, raw])
}

fn record_for(id: PasteId, burn: bool, expires_at: Option<u64>, now: u64) -> PasteRecord {
    PasteRecord {
        id,
        encrypted_content: "Y2lwaGVydGV4dA==".to_string(),
        nonce: "bm9uY2U=".to_string(),
        burn_after_reading: burn,
        expires_at: expires_at.map(Timestamp::from_secs),
        created_at: Timestamp::from_secs(now),
    }
}

fuzz_target!(|scenario: LifecycleScenario| {
    let store = MemoryStore::new();
    let mut model: HashMap<PasteId, ModelRow> = HashMap::new();
    let mut now: u64 = 1_000;

    for op in scenario.operations {
        match op {
            LifecycleOperation::Put { id, burn, ttl_secs } => {
                let id = paste_id(id);
                let expires_at = ttl_secs.map(|ttl| now + ttl as u64);
                let result = store.put(&record_for(id, burn, expires_at, now), &[]);

                if model.contains_key(&id) {
                    assert!(
                        matches!(result, Err(StoreError::Duplicate { .. })),
                        "re-putting a stored ID must fail with Duplicate"
                    );
                } else {
                    result.expect("put of a free ID must succeed");
                    model.insert(id, ModelRow { burn, expires_at });
                }
            },

            LifecycleOperation::Read { id } => {
                let id = paste_id(id);
                let outcome = store
                    .read_and_maybe_consume(&id, Timestamp::from_secs(now))
                    .expect("read must not fail");

                match model.get(&id).copied() {
                    Some(row) if row.expired(now) => {
                        assert!(
                            matches!(outcome, ReadOutcome::Missing),
                            "expired paste must never be served"
                        );
                        model.remove(&id);
                    },
                    Some(row) if row.burn => {
                        assert!(
                            matches!(outcome, ReadOutcome::Consumed { .. }),
                            "first read of a burn paste must consume it"
                        );
                        model.remove(&id);
                    },
                    Some(_) => {
                        assert!(
                            matches!(outcome, ReadOutcome::Open { .. }),
                            "live non-burn paste must be served intact"
                        );
                    },
                    None => {
                        assert!(
                            matches!(outcome, ReadOutcome::Missing),
                            "absent paste must read as Missing"
                        );
                    },
                }
            },

            LifecycleOperation::Get { id } => {
                let id = paste_id(id);
                let row = store.get(&id).expect("get must not fail");
                // Inspection sees rows regardless of expiry, until something
                // with lifecycle authority removes them
                assert_eq!(row.is_some(), model.contains_key(&id));
            },

            LifecycleOperation::Delete { id } => {
                let id = paste_id(id);
                let removed = store.delete_if_present(&id).expect("delete must not fail");
                assert_eq!(removed, model.remove(&id).is_some());
            },

            LifecycleOperation::Sweep => {
                let swept =
                    store.sweep_expired(Timestamp::from_secs(now)).expect("sweep must not fail");
                let expired: Vec<PasteId> = model
                    .iter()
                    .filter(|(_, row)| row.expired(now))
                    .map(|(id, _)| *id)
                    .collect();

                assert_eq!(swept, expired.len() as u64, "sweep must count exactly the expired");
                for id in expired {
                    model.remove(&id);
                }
            },

            LifecycleOperation::AdvanceTime { secs } => {
                now += secs as u64;
            },
        }
    }

    // Whatever survived in the model must still be readable
    for (id, row) in &model {
        if !row.expired(now) {
            assert!(store.get(id).expect("get must not fail").is_some());
        }
    }
});
