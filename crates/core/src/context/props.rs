//! Property-based tests for admin context construction.
//!
//! - Fee allowlist disjointness is enforced at construction

use std::collections::BTreeSet;

use ledgerline_shared::types::{BusinessId, Currency};
use proptest::prelude::*;
use uuid::Uuid;

use super::admin::AdminContext;
use super::error::ContextError;

/// Strategy drawing business IDs from a small pool so that overlaps actually happen.
fn business_ids() -> impl Strategy<Value = Vec<BusinessId>> {
    prop::collection::vec(
        (0u128..12).prop_map(|n| BusinessId::from_uuid(Uuid::from_u128(n + 1))),
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* pair of allowlists, construction succeeds exactly when they are disjoint,
    /// and an accepted context never holds a business in both sets.
    #[test]
    fn prop_fee_allowlists_disjoint(
        supplemental in business_ids(),
        fundamental in business_ids(),
    ) {
        let s: BTreeSet<_> = supplemental.iter().copied().collect();
        let f: BTreeSet<_> = fundamental.iter().copied().collect();
        let expected_overlap: Vec<_> = s.intersection(&f).copied().collect();

        let result = AdminContext::new(Currency::Ils, BusinessId::new())
            .with_fee_allowlists(supplemental, fundamental);

        match result {
            Ok(context) => {
                prop_assert!(expected_overlap.is_empty());
                prop_assert!(context
                    .supplemental_fee_business_ids()
                    .is_disjoint(context.fundamental_fee_business_ids()));
            }
            Err(ContextError::OverlappingFeeAllowlists { business_ids }) => {
                prop_assert_eq!(business_ids, expected_overlap);
            }
        }
    }
}
