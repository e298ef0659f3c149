//! Cinderbin Core
//!
//! Paste records, the lifecycle state machine and the storage contract.
//! No I/O lives here: time is always a parameter, lifecycle transitions are
//! returned as decisions, and storage is a trait the server implements.
//!
//! Just as important is what these types cannot carry. A [`PasteRecord`]
//! holds opaque base64 ciphertext and nonces; there is no field for a key
//! and no code path that could decrypt. The server builds entirely on this
//! crate, so it is structurally incapable of reading a paste.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod lifecycle;
pub mod record;
pub mod store;
pub mod time;

pub use lifecycle::{ReadDecision, expires_at_for, is_expired};
pub use record::{AttachmentRecord, PasteRecord};
pub use store::{MAX_ATTACHMENT_BYTES, PasteError, PasteStore, ReadOutcome, StoreError};
pub use time::Timestamp;
