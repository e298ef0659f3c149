//! Property-based tests for paste encryption
//!
//! These verify the invariants the rest of the system leans on:
//!
//! 1. **Round-trip**: decrypt(encrypt(m, k), k) == m for all m
//! 2. **Tamper evidence**: flipping any bit of ciphertext or nonce fails
//! 3. **Key isolation**: a different key never decrypts
//! 4. **Total parsing**: arbitrary input to import/decrypt errors, never panics

use base64ct::{Base64, Encoding};
use cinderbin_crypto::{
    CryptoError, KEY_SIZE, SymmetricKey, decrypt_file, decrypt_text, encrypt_file, encrypt_text,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_text_roundtrip(text in ".*", key_bytes in any::<[u8; KEY_SIZE]>()) {
        let key = SymmetricKey::from_bytes(key_bytes);
        let sealed = encrypt_text(&text, &key).unwrap();
        let opened = decrypt_text(&sealed.ciphertext, &sealed.nonce, &key).unwrap();
        prop_assert_eq!(opened, text);
    }

    #[test]
    fn prop_file_roundtrip(
        bytes in prop::collection::vec(any::<u8>(), 0..4096),
        filename in "[a-zA-Z0-9._ -]{1,64}",
        key_bytes in any::<[u8; KEY_SIZE]>(),
    ) {
        let key = SymmetricKey::from_bytes(key_bytes);
        let sealed = encrypt_file(&bytes, &filename, &key).unwrap();
        prop_assert_eq!(sealed.plaintext_size, bytes.len() as u64);

        let opened = decrypt_file(&sealed, &key).unwrap();
        prop_assert_eq!(opened.bytes, bytes);
        prop_assert_eq!(opened.filename, filename);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_any_ciphertext_bitflip_fails(
        text in ".{1,256}",
        key_bytes in any::<[u8; KEY_SIZE]>(),
        byte_pick in any::<u16>(),
        bit in 0u8..8,
    ) {
        let key = SymmetricKey::from_bytes(key_bytes);
        let sealed = encrypt_text(&text, &key).unwrap();

        let mut raw = Base64::decode_vec(&sealed.ciphertext).unwrap();
        let idx = byte_pick as usize % raw.len();
        raw[idx] ^= 1 << bit;
        let tampered = Base64::encode_string(&raw);

        let result = decrypt_text(&tampered, &sealed.nonce, &key);
        prop_assert_eq!(result, Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn prop_any_nonce_bitflip_fails(
        text in ".{0,256}",
        key_bytes in any::<[u8; KEY_SIZE]>(),
        byte_pick in any::<u8>(),
        bit in 0u8..8,
    ) {
        let key = SymmetricKey::from_bytes(key_bytes);
        let sealed = encrypt_text(&text, &key).unwrap();

        let mut raw = Base64::decode_vec(&sealed.nonce).unwrap();
        let idx = byte_pick as usize % raw.len();
        raw[idx] ^= 1 << bit;
        let tampered = Base64::encode_string(&raw);

        let result = decrypt_text(&sealed.ciphertext, &tampered, &key);
        prop_assert_eq!(result, Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn prop_wrong_key_never_decrypts(
        text in ".{0,256}",
        key_bytes in any::<[u8; KEY_SIZE]>(),
        other_bytes in any::<[u8; KEY_SIZE]>(),
    ) {
        prop_assume!(key_bytes != other_bytes);

        let key = SymmetricKey::from_bytes(key_bytes);
        let other = SymmetricKey::from_bytes(other_bytes);

        let sealed = encrypt_text(&text, &key).unwrap();
        let result = decrypt_text(&sealed.ciphertext, &sealed.nonce, &other);
        prop_assert_eq!(result, Err(CryptoError::DecryptionFailed));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_key_export_import_roundtrip(key_bytes in any::<[u8; KEY_SIZE]>()) {
        let key = SymmetricKey::from_bytes(key_bytes);
        let imported = SymmetricKey::import(&key.export()).unwrap();
        prop_assert_eq!(imported.export(), key.export());
    }

    #[test]
    fn prop_import_never_panics(junk in ".*") {
        // Errors are fine; panics are not
        let _ = SymmetricKey::import(&junk);
    }

    #[test]
    fn prop_decrypt_never_panics(
        ciphertext in ".*",
        nonce in ".*",
        key_bytes in any::<[u8; KEY_SIZE]>(),
    ) {
        let key = SymmetricKey::from_bytes(key_bytes);
        let _ = decrypt_text(&ciphertext, &nonce, &key);
    }
}
