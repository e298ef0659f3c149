//! Fuzz target for CreatePasteRequest JSON decoding
//!
//! Everything the server learns about a paste comes in through this body,
//! straight off the network. The fuzzer looks for:
//! - Panics in serde or the custom Expiry/PasteId deserializers
//! - Unknown retention tokens slipping through instead of failing
//! - Requests that decode but re-encode to a different meaning
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use cinderbin_proto::{CreatePasteRequest, PasteResponse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = serde_json::from_slice::<CreatePasteRequest>(data) {
        // Whatever decodes must survive a serialize/deserialize round-trip
        let encoded = serde_json::to_vec(&request).expect("decoded request must encode");
        let again: CreatePasteRequest =
            serde_json::from_slice(&encoded).expect("re-encoded request must decode");
        assert_eq!(again, request);
    }

    let _ = serde_json::from_slice::<PasteResponse>(data);
});
