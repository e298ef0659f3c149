//! Symmetric key generation, export and import
//!
//! One fresh key per paste. The exported base64 form travels in the URL
//! fragment, which browsers never send to the server.

use base64ct::{Base64, Encoding};
use zeroize::Zeroize;

use crate::error::CryptoError;

/// Symmetric key size in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// A 256-bit symmetric key for AES-256-GCM.
///
/// Key material is zeroized on drop and has no `Debug` or serde form. The
/// only way bytes leave this type is [`export`](Self::export).
#[derive(Clone)]
pub struct SymmetricKey {
    key: [u8; KEY_SIZE],
}

impl SymmetricKey {
    /// Generate a fresh key from the OS secure random source.
    ///
    /// # Errors
    ///
    /// - `Rng`: the OS random source is unavailable. There is no fallback
    ///   to a weaker source.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut key = [0u8; KEY_SIZE];
        getrandom::fill(&mut key).map_err(|e| CryptoError::Rng(e.to_string()))?;
        Ok(Self { key })
    }

    /// Construct a key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Raw key bytes for the cipher.
    pub(crate) fn bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Export as padded standard base64, safe to place in a URL fragment.
    pub fn export(&self) -> String {
        Base64::encode_string(&self.key)
    }

    /// Import a key previously produced by [`export`](Self::export).
    ///
    /// Accepting a string here proves nothing about whether it is the right
    /// key for some ciphertext; that is only discovered at decrypt time via
    /// tag verification.
    ///
    /// # Errors
    ///
    /// - `MalformedKey`: invalid base64, or decoded length is not 32 bytes
    pub fn import(exported: &str) -> Result<Self, CryptoError> {
        let bytes = Base64::decode_vec(exported)
            .map_err(|_| CryptoError::MalformedKey { reason: "invalid base64".to_string() })?;
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::MalformedKey {
                reason: format!("expected {KEY_SIZE} bytes, got {}", bytes.len()),
            });
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&bytes);
        Ok(Self { key })
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
