//! Fuzz target for ShareLink::parse
//!
//! Share links arrive from clipboards, chat messages and query strings, so
//! the parser must survive anything. The fuzzer looks for:
//! - Panics on missing or repeated `#` separators
//! - Panics on non-ASCII or embedded NUL input
//! - Parsed links that do not round-trip through to_url
//!
//! The fuzzer should NEVER panic. All invalid inputs should return an error.

#![no_main]

use cinderbin_client::ShareLink;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(link) = ShareLink::parse(data) {
        // A link that parses must round-trip through its own rendering
        let url = link.to_url("https://cinderb.in");
        let again = ShareLink::parse(&url).expect("rendered link must parse");
        assert_eq!(again.id, link.id);
        assert_eq!(again.key.export(), link.key.export());
    }
});
