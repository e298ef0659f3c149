//! Fuzz target for decrypt_text with hostile ciphertext
//!
//! Decryption runs on whatever the server handed back, which an attacker
//! may have influenced. The fuzzer looks for:
//! - Panics on malformed base64 ciphertext or nonce
//! - Panics on truncated input shorter than a tag
//! - Forgeries: input that authenticates under a key it was not sealed with
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use cinderbin_crypto::{SymmetricKey, decrypt_text, encrypt_text};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    let (ciphertext, nonce) = input;
    let key = SymmetricKey::from_bytes([7u8; 32]);

    // Arbitrary input must never authenticate; the chance of hitting a real
    // AES-GCM forgery by fuzzing is negligible, so any Ok here is a bug
    assert!(decrypt_text(ciphertext, nonce, &key).is_err());

    // A genuine seal under a different key must not open under this one
    let other = SymmetricKey::from_bytes([8u8; 32]);
    if let Ok(sealed) = encrypt_text(ciphertext, &other) {
        assert!(decrypt_text(&sealed.ciphertext, &sealed.nonce, &key).is_err());
    }
});
