//! Fuzz target for SymmetricKey::import
//!
//! Key import handles what a user pastes after the `#` of a share link, so
//! it sees arbitrary hostile input. The fuzzer looks for:
//! - Panics on malformed base64
//! - Panics on wrong-length key material
//! - Inputs that import but export to something different
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use cinderbin_crypto::SymmetricKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(key) = SymmetricKey::import(data) {
        // Anything that imports must export to a canonical form that
        // imports again to the same key
        let exported = key.export();
        let again = SymmetricKey::import(&exported).expect("canonical export must import");
        assert_eq!(again.export(), exported);
    }
});
