//! Paste service: validation, ID assignment and lifecycle orchestration.
//!
//! Sits between the HTTP layer and a [`PasteStore`]. Handlers stay thin;
//! every decision happens here, judged against a single clock reading per
//! request.

use std::time::Duration;

use cinderbin_core::{
    AttachmentRecord, MAX_ATTACHMENT_BYTES, PasteError, PasteRecord, PasteStore, ReadOutcome,
    StoreError, expires_at_for,
};
use cinderbin_proto::{AttachmentPayload, CreatePasteRequest, PasteId, PasteResponse, id::ID_LEN};
use tracing::{debug, info, warn};

use crate::clock::Clock;

/// Attempts at a fresh random ID before giving up.
///
/// A collision in 64 random bits is vanishingly rare; three in a row means
/// the RNG or the store is broken, not bad luck.
const ID_RETRY_LIMIT: u32 = 3;

/// The paste service.
///
/// Cheap to clone; every request can hold its own handle. Storage calls run
/// on the blocking pool with a deadline, so a stuck store surfaces as
/// [`StoreError::Unavailable`] instead of a hung request.
#[derive(Clone)]
pub struct PasteService<S, C> {
    store: S,
    clock: C,
    store_timeout: Duration,
}

impl<S: PasteStore, C: Clock> PasteService<S, C> {
    /// Create a service over `store`, reading time from `clock`.
    pub fn new(store: S, clock: C, store_timeout: Duration) -> Self {
        Self { store, clock, store_timeout }
    }

    /// Validate and store a new paste under a freshly generated ID.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: required fields are empty
    /// - `PayloadTooLarge`: an attachment declares more than the per-file cap
    /// - `Store`: the backend failed or did not answer in time
    pub async fn create(&self, request: CreatePasteRequest) -> Result<PasteId, PasteError> {
        validate(&request)?;

        let now = self.clock.now();
        let expires_at = expires_at_for(request.expires_in, now);

        let attachments: Vec<AttachmentRecord> =
            request.attachments.into_iter().map(AttachmentRecord::from).collect();

        for attempt in 1..=ID_RETRY_LIMIT {
            let id = generate_id();
            let record = PasteRecord {
                id,
                encrypted_content: request.encrypted_content.clone(),
                nonce: request.iv.clone(),
                burn_after_reading: request.burn_after_reading,
                expires_at,
                created_at: now,
            };
            let files = attachments.clone();

            match self.with_store(move |store| store.put(&record, &files)).await {
                Ok(()) => {
                    info!(%id, "paste created");
                    return Ok(id);
                },
                Err(StoreError::Duplicate { .. }) if attempt < ID_RETRY_LIMIT => {
                    warn!(%id, attempt, "paste id collision, retrying with a fresh id");
                },
                Err(e) => return Err(e.into()),
            }
        }

        unreachable!("loop returns on success or terminal error by the last attempt")
    }

    /// Serve a paste, applying its lifecycle.
    ///
    /// A burn-after-reading paste is destroyed by the same store operation
    /// that fetched it; by the time the response body exists, a second
    /// reader already sees nothing.
    ///
    /// # Errors
    ///
    /// - `NotFound`: absent, expired or already consumed
    /// - `Store`: the backend failed or did not answer in time
    pub async fn read(&self, id: PasteId) -> Result<PasteResponse, PasteError> {
        let now = self.clock.now();

        let outcome = self.with_store(move |store| store.read_and_maybe_consume(&id, now)).await?;

        match outcome {
            ReadOutcome::Open { record, attachments } => {
                debug!(%id, "paste served");
                Ok(to_response(record, attachments))
            },
            ReadOutcome::Consumed { record, attachments } => {
                info!(%id, "paste burned after read");
                Ok(to_response(record, attachments))
            },
            ReadOutcome::Missing => Err(PasteError::NotFound),
        }
    }

    /// Explicitly delete a paste.
    ///
    /// # Errors
    ///
    /// - `NotFound`: nothing was there to delete
    /// - `Store`: the backend failed or did not answer in time
    pub async fn delete(&self, id: PasteId) -> Result<(), PasteError> {
        let removed = self.with_store(move |store| store.delete_if_present(&id)).await?;

        if removed {
            info!(%id, "paste deleted");
            Ok(())
        } else {
            Err(PasteError::NotFound)
        }
    }

    /// Remove every paste whose expiry has passed. Returns how many went.
    pub async fn sweep(&self) -> Result<u64, PasteError> {
        let now = self.clock.now();

        let swept = self.with_store(move |store| store.sweep_expired(now)).await?;

        if swept > 0 {
            info!(swept, "removed expired pastes");
        }

        Ok(swept)
    }

    /// Run one store call on the blocking pool, bounded by the deadline.
    async fn with_store<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(S) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.store.clone();
        let work = tokio::task::spawn_blocking(move || op(store));

        match tokio::time::timeout(self.store_timeout, work).await {
            Ok(Ok(result)) => result,
            Ok(Err(join)) => Err(StoreError::Unavailable(format!("storage worker failed: {join}"))),
            Err(_) => Err(StoreError::Unavailable(format!(
                "no answer within {}ms",
                self.store_timeout.as_millis()
            ))),
        }
    }
}

/// Reject requests the store should never see.
fn validate(request: &CreatePasteRequest) -> Result<(), PasteError> {
    if request.encrypted_content.is_empty() || request.iv.is_empty() {
        return Err(PasteError::InvalidRequest("encrypted content and iv are required"));
    }

    for attachment in &request.attachments {
        if attachment.file_size > MAX_ATTACHMENT_BYTES {
            return Err(PasteError::PayloadTooLarge {
                limit: MAX_ATTACHMENT_BYTES,
                got: attachment.file_size,
            });
        }

        if attachment.encrypted_data.is_empty()
            || attachment.iv.is_empty()
            || attachment.encrypted_filename.is_empty()
            || attachment.filename_iv.is_empty()
        {
            return Err(PasteError::InvalidRequest("attachment fields are required"));
        }
    }

    Ok(())
}

/// Generate a random paste ID.
///
/// # Panics
///
/// Panics if the OS RNG fails. A server that cannot draw randomness would
/// mint guessable paste URLs, and it must not run in that state.
#[allow(clippy::expect_used)]
fn generate_id() -> PasteId {
    let mut bytes = [0u8; ID_LEN];
    getrandom::fill(&mut bytes)
        .expect("invariant: OS RNG failure is unrecoverable - server cannot operate securely");

    PasteId::from_bytes(bytes)
}

fn to_response(record: PasteRecord, attachments: Vec<AttachmentRecord>) -> PasteResponse {
    PasteResponse {
        encrypted_content: record.encrypted_content,
        iv: record.nonce,
        burn_after_reading: record.burn_after_reading,
        attachments: attachments.into_iter().map(AttachmentPayload::from).collect(),
    }
}
