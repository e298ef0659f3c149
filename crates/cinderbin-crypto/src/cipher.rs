//! Paste content encryption using AES-256-GCM
//!
//! Every encryption draws a fresh 96-bit nonce from the OS random source.
//! Combined with a fresh key per paste, a (key, nonce) pair is never reused.
//!
//! Transport forms are padded standard base64. The server stores these
//! strings without decoding them.

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use base64ct::{Base64, Encoding};

use crate::{error::CryptoError, key::SymmetricKey};

/// AES-GCM nonce size in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// GCM authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

/// Encrypted text content in transport form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Base64 ciphertext including the 16-byte authentication tag
    pub ciphertext: String,
    /// Base64 form of the 12-byte nonce this ciphertext was sealed under
    pub nonce: String,
}

/// Encrypt text content under a fresh random nonce.
///
/// Ciphertext length is plaintext length plus the 16-byte tag, so content
/// length is visible to the server. That leak is accepted; padding schemes
/// are out of scope.
///
/// # Errors
///
/// - `Rng`: the OS random source is unavailable
pub fn encrypt_text(plaintext: &str, key: &SymmetricKey) -> Result<EncryptedPayload, CryptoError> {
    let (ciphertext, nonce) = seal(plaintext.as_bytes(), key)?;
    Ok(EncryptedPayload {
        ciphertext: Base64::encode_string(&ciphertext),
        nonce: Base64::encode_string(&nonce),
    })
}

/// Decrypt text content.
///
/// The tag proves the bytes are exactly what was sealed, so a non-UTF-8
/// payload is decoded lossily rather than rejected.
///
/// # Errors
///
/// - `MalformedCiphertext`: ciphertext or nonce is not valid base64, the
///   nonce is not 12 bytes, or the ciphertext cannot contain a tag
/// - `DecryptionFailed`: tag verification failed; never partial plaintext
pub fn decrypt_text(
    ciphertext: &str,
    nonce: &str,
    key: &SymmetricKey,
) -> Result<String, CryptoError> {
    let ciphertext = decode_field("ciphertext", ciphertext)?;
    let nonce = decode_nonce(nonce)?;
    let plaintext = open(&ciphertext, &nonce, key)?;
    Ok(String::from_utf8_lossy(&plaintext).into_owned())
}

/// Seal raw bytes under a fresh random nonce.
pub(crate) fn seal(
    plaintext: &[u8],
    key: &SymmetricKey,
) -> Result<(Vec<u8>, [u8; NONCE_SIZE]), CryptoError> {
    let mut nonce = [0u8; NONCE_SIZE];
    getrandom::fill(&mut nonce).map_err(|e| CryptoError::Rng(e.to_string()))?;

    let cipher = Aes256Gcm::new(key.bytes().into());
    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(&nonce), plaintext) else {
        unreachable!("AES-256-GCM encryption cannot fail with valid inputs");
    };

    Ok((ciphertext, nonce))
}

/// Open sealed bytes, verifying the authentication tag.
pub(crate) fn open(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_SIZE],
    key: &SymmetricKey,
) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::MalformedCiphertext {
            reason: format!("ciphertext shorter than the {TAG_SIZE}-byte tag"),
        });
    }

    let cipher = Aes256Gcm::new(key.bytes().into());
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// Decode a base64 transport field, naming it in the failure.
pub(crate) fn decode_field(field: &str, value: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(value).map_err(|_| CryptoError::MalformedCiphertext {
        reason: format!("{field} is not valid base64"),
    })
}

/// Decode and length-check a base64 nonce.
pub(crate) fn decode_nonce(value: &str) -> Result<[u8; NONCE_SIZE], CryptoError> {
    let bytes = decode_field("nonce", value)?;
    <[u8; NONCE_SIZE]>::try_from(bytes.as_slice()).map_err(|_| {
        CryptoError::MalformedCiphertext {
            reason: format!("nonce must be {NONCE_SIZE} bytes, got {}", bytes.len()),
        }
    })
}
