//! Paste lifecycle state machine.
//!
//! Uses the decision pattern: functions take the current time as input and
//! return what should happen, and the store executes the decision inside its
//! atomic read operation. This keeps the rules pure (no clock, no I/O) and
//! makes every transition testable with a literal timestamp.
//!
//! # State Machine
//!
//! ```text
//!                 put
//!   (absent) ──────────────▶ Active ─────────────────────┐
//!      ▲                       │                         │ read with
//!      │                       │ now >= expires_at       │ burn_after_reading
//!      │                       ▼                         ▼
//!      │                    Expired                  Consumed
//!      │                       │                         │
//!      │   read / sweep purges │     delete is part of   │
//!      │                       │     the read itself     │
//!      └───────────────────────┴─────────────────────────┘
//!                (also: explicit delete from any state)
//! ```
//!
//! Expired, Consumed and explicitly Deleted are the same thing to an
//! observer: absence. Nothing in a response may reveal which applied.

use cinderbin_proto::Expiry;

use crate::{record::PasteRecord, time::Timestamp};

/// What a read must do, decided against a single `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadDecision {
    /// Serve the ciphertext; the record stays.
    Serve,

    /// Serve the ciphertext, then destroy the record within the same atomic
    /// operation. At most one concurrent reader may get this decision.
    ServeAndBurn,

    /// Past expiry: destroy the record within the same atomic operation and
    /// report absence. The response must be indistinguishable from a paste
    /// that never existed.
    ExpireAndPurge,
}

impl ReadDecision {
    /// Decide what a read of `record` at `now` must do.
    ///
    /// Expiry wins over burn: a paste that is both expired and
    /// burn-after-reading is gone, not readable-one-last-time.
    pub fn for_record(record: &PasteRecord, now: Timestamp) -> Self {
        if is_expired(record.expires_at, now) {
            Self::ExpireAndPurge
        } else if record.burn_after_reading {
            Self::ServeAndBurn
        } else {
            Self::Serve
        }
    }
}

/// True once `now` has reached the expiry instant.
///
/// The boundary is inclusive: at exactly `expires_at` the paste is gone.
pub fn is_expired(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.is_some_and(|at| now >= at)
}

/// Absolute expiry for a paste created at `created_at`.
///
/// `None` in means no token was supplied; `None` out means the paste never
/// expires. Unknown tokens cannot reach here: [`Expiry`] is a closed enum
/// and its parsers reject anything outside the set.
pub fn expires_at_for(expiry: Option<Expiry>, created_at: Timestamp) -> Option<Timestamp> {
    expiry
        .and_then(Expiry::offset)
        .map(|offset| created_at.saturating_add(offset))
}
