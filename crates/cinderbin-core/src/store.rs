//! Storage contract and the service-level error taxonomy
//!
//! Stores are synchronous and handle-cloneable; the server bridges them onto
//! the async runtime. The one operation with teeth is
//! [`read_and_maybe_consume`](PasteStore::read_and_maybe_consume): lifecycle
//! correctness lives or dies on its atomicity.

use cinderbin_proto::PasteId;
pub use cinderbin_proto::MAX_ATTACHMENT_BYTES;
use thiserror::Error;

use crate::{
    record::{AttachmentRecord, PasteRecord},
    time::Timestamp,
};

/// Result of one atomic lifecycle read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The paste was served and retained.
    Open {
        /// The paste itself
        record: PasteRecord,
        /// Its attachments
        attachments: Vec<AttachmentRecord>,
    },

    /// The paste was served and destroyed by this very read. Exactly one
    /// caller can ever receive this for a given paste.
    Consumed {
        /// The paste itself, already gone from the store
        record: PasteRecord,
        /// Its attachments, gone with it
        attachments: Vec<AttachmentRecord>,
    },

    /// Nothing to serve: absent, expired (now purged) or already consumed.
    /// Which of those applied is not represented; callers cannot tell.
    Missing,
}

/// Storage backend errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Underlying storage I/O failed
    #[error("storage i/o: {0}")]
    Io(String),

    /// A stored value could not be encoded or decoded
    #[error("storage serialization: {0}")]
    Serialization(String),

    /// A record with this ID already exists
    #[error("duplicate paste id: {id}")]
    Duplicate {
        /// The colliding identifier
        id: PasteId,
    },

    /// The store did not answer within its deadline
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true if retrying the same call later may succeed.
    ///
    /// `Duplicate` is not transient for the same inputs; the caller retries
    /// with a freshly generated ID instead.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Io(_) | Self::Unavailable(_) => true,
            Self::Serialization(_) | Self::Duplicate { .. } => false,
        }
    }
}

/// Service-level errors for paste operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasteError {
    /// Absent, expired or consumed; no caller may learn which
    #[error("paste not found")]
    NotFound,

    /// A declared payload size exceeds the ceiling
    #[error("payload too large: {got} bytes exceeds the {limit}-byte limit")]
    PayloadTooLarge {
        /// The enforced ceiling in bytes
        limit: u64,
        /// The declared size in bytes
        got: u64,
    },

    /// The request is structurally unusable (empty required fields)
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    /// The storage backend failed
    #[error("storage: {0}")]
    Store(#[from] StoreError),
}

/// A paste store.
///
/// `Clone` hands out another handle to the same underlying store, cheap
/// enough to give every request its own. Implementations are used from
/// blocking-pool threads and must be safe under concurrent calls.
///
/// # Atomicity
///
/// `read_and_maybe_consume` executes a [`ReadDecision`](crate::ReadDecision)
/// as one indivisible unit. Once a call decides to consume or purge, no
/// concurrent call may observe the record: two racing readers of a
/// burn-after-reading paste get exactly one `Consumed` and one `Missing`,
/// never two `Consumed`.
pub trait PasteStore: Clone + Send + Sync + 'static {
    /// Insert a new paste with its attachments as one unit.
    ///
    /// # Errors
    ///
    /// - `Duplicate`: a record with this ID already exists; nothing changed
    fn put(&self, record: &PasteRecord, attachments: &[AttachmentRecord]) -> Result<(), StoreError>;

    /// Fetch without lifecycle effects.
    ///
    /// Inspection only (sweeper accounting, tests). Lifecycle reads go
    /// through `read_and_maybe_consume`; this method must never be used to
    /// serve a paste to a caller.
    fn get(&self, id: &PasteId)
    -> Result<Option<(PasteRecord, Vec<AttachmentRecord>)>, StoreError>;

    /// The single atomic lifecycle read. See the trait docs.
    fn read_and_maybe_consume(
        &self,
        id: &PasteId,
        now: Timestamp,
    ) -> Result<ReadOutcome, StoreError>;

    /// Delete if present, cascading to attachments.
    ///
    /// Returns whether anything was removed. Deleting an absent ID is not an
    /// error; repeated deletes are idempotent.
    fn delete_if_present(&self, id: &PasteId) -> Result<bool, StoreError>;

    /// Delete every record whose expiry is at or before `now`, cascading to
    /// attachments. Returns the number of pastes removed.
    ///
    /// Safe to run concurrently with reads, writes and itself; racing
    /// deleters of the same row are resolved by idempotence.
    fn sweep_expired(&self, now: Timestamp) -> Result<u64, StoreError>;
}
