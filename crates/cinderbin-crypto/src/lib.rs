//! Cinderbin Client-Side Encryption
//!
//! AES-256-GCM encryption for paste content and attachments. Everything in
//! this crate runs where the plaintext lives; the server stores only what
//! these functions emit and cannot reverse any of it without the key.
//!
//! # Key Lifecycle
//!
//! One fresh 256-bit key per paste. The key encrypts the content, every
//! attachment body and every attachment filename, each under its own nonce,
//! then leaves the process only as a base64 string destined for the URL
//! fragment.
//!
//! ```text
//! SymmetricKey::generate (256-bit, OS random)
//!        │
//!        ├─▶ encrypt_text ──────▶ ciphertext + nonce ─┐
//!        ├─▶ encrypt_file ──▶ body + filename pairs ──┼─▶ server (base64, opaque)
//!        │                                            │
//!        └─▶ export() ──▶ base64 key ──▶ URL fragment (never transmitted)
//! ```
//!
//! Reading reverses the flow: import the key from the fragment, fetch the
//! ciphertext, decrypt locally.
//!
//! # Security
//!
//! - Confidentiality and integrity: AES-256-GCM with a 16-byte tag; any bit
//!   flipped in ciphertext or nonce fails decryption outright
//! - Nonce discipline: every encryption draws a fresh 96-bit random nonce;
//!   content, attachment bodies and filenames never share one, and each
//!   paste has its own key, so a (key, nonce) pair is never reused
//! - Key hygiene: key material is zeroized on drop and has no `Debug` form
//! - No oracle: `DecryptionFailed` reports nothing about why

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod attachment;
pub mod cipher;
pub mod error;
pub mod key;

pub use attachment::{DecryptedFile, EncryptedAttachment, decrypt_file, encrypt_file};
pub use cipher::{EncryptedPayload, NONCE_SIZE, TAG_SIZE, decrypt_text, encrypt_text};
pub use error::CryptoError;
pub use key::{KEY_SIZE, SymmetricKey};
