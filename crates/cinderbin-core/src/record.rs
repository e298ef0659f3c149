//! Stored paste and attachment records
//!
//! Records hold exactly what arrived over the wire: opaque base64 strings.
//! The server never decodes them, so there is nothing here to decode into.

use cinderbin_proto::{AttachmentPayload, PasteId};
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// A stored paste.
///
/// Immutable after insert. The only thing that ever changes is whether the
/// record still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteRecord {
    /// Server-generated identifier
    pub id: PasteId,

    /// Encrypted content, base64, opaque to the server
    pub encrypted_content: String,

    /// Nonce the content was sealed under, base64, opaque to the server
    pub nonce: String,

    /// Destroy on first successful read
    pub burn_after_reading: bool,

    /// Absolute expiry; `None` means the paste never expires
    pub expires_at: Option<Timestamp>,

    /// When the paste was created
    pub created_at: Timestamp,
}

/// A stored attachment, lifetime-bound to its parent paste.
///
/// Every path that deletes the parent deletes these with it; an orphaned
/// attachment row must be unreachable by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Encrypted file body, base64
    pub encrypted_data: String,

    /// Nonce the body was sealed under, base64
    pub data_nonce: String,

    /// Encrypted filename, base64
    pub encrypted_filename: String,

    /// Nonce the filename was sealed under, base64
    pub filename_nonce: String,

    /// Plaintext byte length, in the clear
    pub plaintext_size: u64,
}

impl From<AttachmentPayload> for AttachmentRecord {
    fn from(payload: AttachmentPayload) -> Self {
        Self {
            encrypted_data: payload.encrypted_data,
            data_nonce: payload.iv,
            encrypted_filename: payload.encrypted_filename,
            filename_nonce: payload.filename_iv,
            plaintext_size: payload.file_size,
        }
    }
}

impl From<AttachmentRecord> for AttachmentPayload {
    fn from(record: AttachmentRecord) -> Self {
        Self {
            encrypted_data: record.encrypted_data,
            iv: record.data_nonce,
            encrypted_filename: record.encrypted_filename,
            filename_iv: record.filename_nonce,
            file_size: record.plaintext_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> AttachmentPayload {
        AttachmentPayload {
            encrypted_data: "ZGF0YQ==".to_string(),
            iv: "aXYx".to_string(),
            encrypted_filename: "bmFtZQ==".to_string(),
            filename_iv: "aXYy".to_string(),
            file_size: 512,
        }
    }

    #[test]
    fn attachment_wire_conversion_roundtrip() {
        let payload = sample_payload();
        let record = AttachmentRecord::from(payload.clone());
        assert_eq!(record.data_nonce, "aXYx");
        assert_eq!(record.filename_nonce, "aXYy");

        let back = AttachmentPayload::from(record);
        assert_eq!(back, payload);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = PasteRecord {
            id: "0011223344556677".parse().unwrap(),
            encrypted_content: "Y2lwaGVy".to_string(),
            nonce: "bm9uY2U=".to_string(),
            burn_after_reading: true,
            expires_at: Some(Timestamp::from_secs(1_700_000_000)),
            created_at: Timestamp::from_secs(1_699_996_400),
        };

        let text = serde_json::to_string(&record).unwrap();
        let back: PasteRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }
}
