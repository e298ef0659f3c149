//! Error types for key handling and paste encryption

use thiserror::Error;

/// Errors from key handling, encryption and decryption
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Key text failed structural validation before any cryptography ran
    #[error("malformed key: {reason}")]
    MalformedKey {
        /// What was wrong with the supplied key text
        reason: String,
    },

    /// Ciphertext or nonce failed structural validation before any
    /// cryptography ran
    #[error("malformed ciphertext: {reason}")]
    MalformedCiphertext {
        /// What was wrong with the supplied ciphertext or nonce
        reason: String,
    },

    /// Authentication tag verification failed.
    ///
    /// Carries no detail: a wrong key, a corrupted ciphertext and a
    /// mismatched nonce all produce this same error.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The OS secure random source was unavailable. There is no fallback.
    #[error("secure random source unavailable: {0}")]
    Rng(String),
}

impl CryptoError {
    /// Returns true if the input never reached the cipher.
    ///
    /// Structural errors mean the caller supplied something that is not
    /// even well-formed ciphertext or key text; `DecryptionFailed` means
    /// well-formed input was rejected by tag verification.
    pub fn is_structural(&self) -> bool {
        match self {
            Self::MalformedKey { .. } | Self::MalformedCiphertext { .. } => true,
            Self::DecryptionFailed | Self::Rng(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_key_is_structural() {
        let err = CryptoError::MalformedKey { reason: "invalid base64".to_string() };
        assert!(err.is_structural());
    }

    #[test]
    fn decryption_failed_is_not_structural() {
        assert!(!CryptoError::DecryptionFailed.is_structural());
    }

    #[test]
    fn decryption_failed_display_carries_no_detail() {
        assert_eq!(CryptoError::DecryptionFailed.to_string(), "decryption failed");
    }

    #[test]
    fn error_display() {
        let err = CryptoError::MalformedCiphertext {
            reason: "nonce must be 12 bytes, got 7".to_string(),
        };
        assert_eq!(err.to_string(), "malformed ciphertext: nonce must be 12 bytes, got 7");
    }
}
