//! Property-based tests for lifecycle decisions
//!
//! The decision function is total and order-driven:
//!
//! 1. **Expiry dominance**: past the boundary the only decision is purge
//! 2. **Burn only while alive**: `ServeAndBurn` requires an unexpired record
//! 3. **Boundary**: `now == expires_at` already counts as expired

use cinderbin_core::{PasteRecord, ReadDecision, Timestamp, is_expired};
use proptest::prelude::*;

fn record(burn: bool, expires_at: Option<u64>) -> PasteRecord {
    PasteRecord {
        id: "00112233aabbccdd".parse().unwrap(),
        encrypted_content: "Y2lwaGVy".to_string(),
        nonce: "bm9uY2U=".to_string(),
        burn_after_reading: burn,
        expires_at: expires_at.map(Timestamp::from_secs),
        created_at: Timestamp::from_secs(0),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_decision_matches_clock_order(
        burn in any::<bool>(),
        expires_at in prop::option::of(any::<u64>()),
        now in any::<u64>(),
    ) {
        let decision =
            ReadDecision::for_record(&record(burn, expires_at), Timestamp::from_secs(now));

        let expired = expires_at.is_some_and(|at| now >= at);
        let expected = if expired {
            ReadDecision::ExpireAndPurge
        } else if burn {
            ReadDecision::ServeAndBurn
        } else {
            ReadDecision::Serve
        };
        prop_assert_eq!(decision, expected);
    }

    #[test]
    fn prop_is_expired_agrees_with_ordering(at in any::<u64>(), now in any::<u64>()) {
        prop_assert_eq!(
            is_expired(Some(Timestamp::from_secs(at)), Timestamp::from_secs(now)),
            now >= at
        );
    }
}
