//! Attachment encryption: file body and filename sealed independently
//!
//! A filename is as sensitive as the content it labels, so it gets the same
//! cipher as the body, under its own nonce. The plaintext byte length stays
//! in the clear; that size leak is accepted metadata.

use base64ct::{Base64, Encoding};

use crate::{
    cipher::{decode_field, decode_nonce, open, seal},
    error::CryptoError,
    key::SymmetricKey,
};

/// An encrypted attachment in transport form.
///
/// Ciphertext and nonce fields are padded standard base64, opaque to the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedAttachment {
    /// Encrypted file body including its authentication tag
    pub ciphertext: String,
    /// Nonce the body was sealed under
    pub nonce: String,
    /// Encrypted filename including its authentication tag
    pub encrypted_filename: String,
    /// Nonce the filename was sealed under
    pub filename_nonce: String,
    /// Plaintext byte length, stored in the clear
    pub plaintext_size: u64,
}

/// A decrypted attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedFile {
    /// File contents
    pub bytes: Vec<u8>,
    /// Original filename
    pub filename: String,
}

/// Encrypt a file body and its filename under the same key.
///
/// Two independent encryptions under two independent nonces. The whole
/// buffer is sealed or the call fails; nothing is ever truncated. Size
/// ceilings are the caller's job, enforced before the bytes get here.
///
/// # Errors
///
/// - `Rng`: the OS random source is unavailable
pub fn encrypt_file(
    bytes: &[u8],
    filename: &str,
    key: &SymmetricKey,
) -> Result<EncryptedAttachment, CryptoError> {
    let (body, body_nonce) = seal(bytes, key)?;
    let (name, name_nonce) = seal(filename.as_bytes(), key)?;

    Ok(EncryptedAttachment {
        ciphertext: Base64::encode_string(&body),
        nonce: Base64::encode_string(&body_nonce),
        encrypted_filename: Base64::encode_string(&name),
        filename_nonce: Base64::encode_string(&name_nonce),
        plaintext_size: bytes.len() as u64,
    })
}

/// Decrypt an attachment's body and filename.
///
/// Fails as a unit: a recovered filename is never returned alongside a body
/// that failed, or the other way around.
///
/// # Errors
///
/// - `MalformedCiphertext`: any field is not valid base64 or has an
///   impossible length
/// - `DecryptionFailed`: either tag verification failed
pub fn decrypt_file(
    attachment: &EncryptedAttachment,
    key: &SymmetricKey,
) -> Result<DecryptedFile, CryptoError> {
    let body_ct = decode_field("attachment ciphertext", &attachment.ciphertext)?;
    let body_nonce = decode_nonce(&attachment.nonce)?;
    let bytes = open(&body_ct, &body_nonce, key)?;

    let name_ct = decode_field("encrypted filename", &attachment.encrypted_filename)?;
    let name_nonce = decode_nonce(&attachment.filename_nonce)?;
    let name_bytes = open(&name_ct, &name_nonce, key)?;

    Ok(DecryptedFile {
        bytes,
        filename: String::from_utf8_lossy(&name_bytes).into_owned(),
    })
}
