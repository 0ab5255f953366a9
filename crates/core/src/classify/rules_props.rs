//! Property-based tests for charge classification.
//!
//! - Determinism: same inputs always give the same archetype
//! - Precedence: the returned archetype is the first matching rule's
//! - Internal-transfer threshold and business-trip precedence

use ledgerline_shared::types::{BusinessId, BusinessTripId, ChargeId, Currency, OwnerId};
use proptest::prelude::*;
use uuid::Uuid;

use super::rules::{RULES, classify};
use super::types::ChargeType;
use crate::charge::{Charge, ChargeKind};
use crate::context::AdminContext;

/// Business IDs 1..=12 from a fixed pool so configured roles actually get hit.
fn pooled(n: u8) -> BusinessId {
    BusinessId::from_uuid(Uuid::from_u128(u128::from(n) + 1))
}

/// Context with wallets 0-2, dividend 3, deposit 4, VAT 5, card 6.
fn context(with_deposit: bool, with_vat: bool) -> AdminContext {
    let mut context = AdminContext::new(Currency::Ils, pooled(11))
        .with_internal_wallets([pooled(0), pooled(1), pooled(2)])
        .with_dividends([pooled(3)], Some(pooled(10)))
        .with_credit_cards([pooled(6)]);
    if with_deposit {
        context = context.with_bank_deposit(pooled(4));
    }
    if with_vat {
        context = context.with_vat_authority(pooled(5));
    }
    context
}

fn kind_strategy() -> impl Strategy<Value = Option<ChargeKind>> {
    prop_oneof![
        3 => Just(None),
        1 => Just(Some(ChargeKind::Conversion)),
        1 => Just(Some(ChargeKind::Payroll)),
        1 => Just(Some(ChargeKind::Financial)),
    ]
}

fn charge_strategy() -> impl Strategy<Value = Charge> {
    (
        kind_strategy(),
        any::<bool>(),
        prop::option::of(0u8..10),
        prop::collection::btree_set(0u8..10, 0..5),
    )
        .prop_map(|(kind, on_trip, primary, array)| {
            let mut charge = Charge::new(ChargeId::new(), OwnerId::new())
                .with_business_array(array.into_iter().map(pooled));
            charge.kind = kind;
            charge.business_id = primary.map(pooled);
            if on_trip {
                charge = charge.with_business_trip(BusinessTripId::new());
            }
            charge
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// *For any* charge and context, classification is deterministic.
    #[test]
    fn prop_classify_deterministic(
        charge in charge_strategy(),
        with_deposit in any::<bool>(),
        with_vat in any::<bool>(),
    ) {
        let context = context(with_deposit, with_vat);
        let first = classify(&charge, &context);
        let cloned = charge.clone();
        prop_assert_eq!(first, classify(&cloned, &context));
        prop_assert_eq!(first, classify(&charge, &context.clone()));
    }

    /// *For any* charge, the archetype is the first applicable matching rule's, or
    /// `CommonCharge` when none matches.
    #[test]
    fn prop_first_match_wins(
        charge in charge_strategy(),
        with_deposit in any::<bool>(),
        with_vat in any::<bool>(),
    ) {
        let context = context(with_deposit, with_vat);
        let has_transactions = !charge.business_array.is_empty();
        let expected = RULES
            .iter()
            .find(|r| (has_transactions || !r.needs_transactions) && (r.matches)(&charge, &context))
            .map_or(ChargeType::CommonCharge, |r| r.charge_type);
        prop_assert_eq!(classify(&charge, &context), expected);
    }

    /// *For any* unhinted trip charge touching two internal wallets, the trip rule wins.
    #[test]
    fn prop_business_trip_precedes_internal_transfer(
        wallets in prop::sample::subsequence(vec![0u8, 1, 2], 2..=3),
        extra in prop::collection::btree_set(3u8..10, 0..3),
    ) {
        let charge = Charge::new(ChargeId::new(), OwnerId::new())
            .with_business_trip(BusinessTripId::new())
            .with_business_array(wallets.into_iter().chain(extra).map(pooled));
        prop_assert_eq!(classify(&charge, &context(true, true)), ChargeType::BusinessTripCharge);
    }

    /// *For any* unhinted charge with only plain counterparties, touching exactly one wallet is a
    /// common charge and touching two or more is an internal transfer.
    #[test]
    fn prop_internal_transfer_threshold(
        wallets in prop::sample::subsequence(vec![0u8, 1, 2], 1..=3),
        plain in prop::collection::btree_set(7u8..10, 0..3),
    ) {
        let wallet_count = wallets.len();
        let charge = Charge::new(ChargeId::new(), OwnerId::new())
            .with_business_array(wallets.into_iter().chain(plain).map(pooled));
        let expected = if wallet_count > 1 {
            ChargeType::InternalTransferCharge
        } else {
            ChargeType::CommonCharge
        };
        prop_assert_eq!(classify(&charge, &context(true, true)), expected);
    }
}
