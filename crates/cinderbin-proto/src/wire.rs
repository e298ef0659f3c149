//! JSON bodies for the HTTP API
//!
//! Field names follow the original wire format (`encryptedContent`, `iv`,
//! `burnAfterReading`, ...). All cryptographic material is carried as opaque
//! base64 strings; the server round-trips them without decoding.

use serde::{Deserialize, Serialize};

use crate::{expiry::Expiry, id::PasteId};

/// Maximum attachment plaintext size in bytes (25 MiB).
///
/// Part of the API contract: clients check it before encrypting, the server
/// checks the declared `fileSize` at ingest and answers 413 past it.
pub const MAX_ATTACHMENT_BYTES: u64 = 25 * 1024 * 1024;

/// An encrypted attachment as it travels in both directions.
///
/// `fileSize` is the plaintext byte length, sent in the clear so clients can
/// show it before downloading. Accepted metadata leak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPayload {
    /// Encrypted file body, base64
    pub encrypted_data: String,

    /// Nonce the body was sealed under, base64
    pub iv: String,

    /// Encrypted filename, base64
    pub encrypted_filename: String,

    /// Nonce the filename was sealed under, base64
    pub filename_iv: String,

    /// Plaintext byte length
    pub file_size: u64,
}

/// `POST /api/pastes` request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasteRequest {
    /// Encrypted paste content, base64
    pub encrypted_content: String,

    /// Nonce the content was sealed under, base64
    pub iv: String,

    /// Destroy the paste on first read
    #[serde(default)]
    pub burn_after_reading: bool,

    /// Retention window; absent means no expiry.
    /// An unrecognized token fails deserialization of the whole request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<Expiry>,

    /// Encrypted attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload>,
}

/// `POST /api/pastes` response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePasteResponse {
    /// Identifier of the stored paste
    pub id: PasteId,
}

/// `GET /api/pastes/{id}` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteResponse {
    /// Encrypted paste content, base64
    pub encrypted_content: String,

    /// Nonce the content was sealed under, base64
    pub iv: String,

    /// True when this read consumed the paste
    pub burn_after_reading: bool,

    /// Encrypted attachments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload>,
}

/// Error body for every non-2xx API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable category; never detailed enough to reveal lifecycle
    /// state
    pub error: String,
}

/// `GET /health` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process is serving
    pub status: String,
}
