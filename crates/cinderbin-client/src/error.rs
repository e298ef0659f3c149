//! Client-side error taxonomy.

use cinderbin_crypto::CryptoError;
use thiserror::Error;

/// Errors from sealing, opening and share-link handling.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A cryptographic operation failed
    #[error("crypto: {0}")]
    Crypto(#[from] CryptoError),

    /// A file exceeds the per-attachment ceiling
    #[error("file too large: {got} bytes exceeds the {limit}-byte limit")]
    FileTooLarge {
        /// The enforced ceiling in bytes
        limit: u64,
        /// The offered size in bytes
        got: u64,
    },

    /// A share link could not be parsed
    #[error("malformed share link: {reason}")]
    MalformedLink {
        /// What was wrong with it
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_errors_convert() {
        let err: ClientError = CryptoError::DecryptionFailed.into();
        assert!(matches!(err, ClientError::Crypto(CryptoError::DecryptionFailed)));
    }

    #[test]
    fn file_too_large_display() {
        let err = ClientError::FileTooLarge { limit: 26_214_400, got: 30_000_000 };
        assert_eq!(
            err.to_string(),
            "file too large: 30000000 bytes exceeds the 26214400-byte limit"
        );
    }
}
