//! Sealing and opening pastes.
//!
//! All cryptography happens here, on the client; what leaves [`seal`] is
//! exactly the request body the server stores. One fresh key per paste
//! covers the content and every attachment.

use cinderbin_crypto::{
    DecryptedFile, EncryptedAttachment, SymmetricKey, decrypt_file, decrypt_text, encrypt_file,
    encrypt_text,
};
use cinderbin_proto::{
    AttachmentPayload, CreatePasteRequest, Expiry, MAX_ATTACHMENT_BYTES, PasteResponse,
};

use crate::error::ClientError;

/// A file to attach, still in the clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToAttach {
    /// File contents
    pub bytes: Vec<u8>,

    /// Filename shown again after decryption
    pub filename: String,
}

/// Retention and burn choices for a new paste.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasteOptions {
    /// Destroy the paste on first read
    pub burn_after_reading: bool,

    /// Retention window; `None` sends no expiry
    pub expires_in: Option<Expiry>,
}

/// A sealed paste: the request to send and the key that must never be sent.
pub struct SealedPaste {
    /// Body for `POST /api/pastes`
    pub request: CreatePasteRequest,

    /// The paste key. Belongs in the URL fragment, nowhere else.
    pub key: SymmetricKey,
}

/// An opened paste, fully decrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedPaste {
    /// Paste text
    pub content: String,

    /// Decrypted attachments
    pub files: Vec<DecryptedFile>,
}

/// Encrypt `content` and `files` under a fresh key.
///
/// # Errors
///
/// - `FileTooLarge`: a file exceeds the per-attachment ceiling; checked
///   before any encryption so nothing is half-sealed
/// - `Crypto`: the OS random source is unavailable
pub fn seal(
    content: &str,
    files: &[FileToAttach],
    options: PasteOptions,
) -> Result<SealedPaste, ClientError> {
    for file in files {
        let size = file.bytes.len() as u64;
        if size > MAX_ATTACHMENT_BYTES {
            return Err(ClientError::FileTooLarge { limit: MAX_ATTACHMENT_BYTES, got: size });
        }
    }

    let key = SymmetricKey::generate()?;

    let content = encrypt_text(content, &key)?;

    let mut attachments = Vec::with_capacity(files.len());
    for file in files {
        let sealed = encrypt_file(&file.bytes, &file.filename, &key)?;
        attachments.push(to_payload(sealed));
    }

    Ok(SealedPaste {
        request: CreatePasteRequest {
            encrypted_content: content.ciphertext,
            iv: content.nonce,
            burn_after_reading: options.burn_after_reading,
            expires_in: options.expires_in,
            attachments,
        },
        key,
    })
}

/// Decrypt a served paste with its key.
///
/// Fails as a unit: either everything authenticates or nothing is returned.
/// A wrong key and a tampered body are indistinguishable here, as they are
/// everywhere else.
///
/// # Errors
///
/// - `Crypto`: a field failed to decode or authenticate
pub fn open(response: &PasteResponse, key: &SymmetricKey) -> Result<OpenedPaste, ClientError> {
    let content = decrypt_text(&response.encrypted_content, &response.iv, key)?;

    let mut files = Vec::with_capacity(response.attachments.len());
    for attachment in &response.attachments {
        files.push(decrypt_file(&from_payload(attachment), key)?);
    }

    Ok(OpenedPaste { content, files })
}

fn to_payload(sealed: EncryptedAttachment) -> AttachmentPayload {
    AttachmentPayload {
        encrypted_data: sealed.ciphertext,
        iv: sealed.nonce,
        encrypted_filename: sealed.encrypted_filename,
        filename_iv: sealed.filename_nonce,
        file_size: sealed.plaintext_size,
    }
}

fn from_payload(payload: &AttachmentPayload) -> EncryptedAttachment {
    EncryptedAttachment {
        ciphertext: payload.encrypted_data.clone(),
        nonce: payload.iv.clone(),
        encrypted_filename: payload.encrypted_filename.clone(),
        filename_nonce: payload.filename_iv.clone(),
        plaintext_size: payload.file_size,
    }
}
