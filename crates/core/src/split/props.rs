//! Property-based tests for the transaction splitters.
//!
//! - Interest split: the largest transaction of every group is principal
//! - Fee split: every transaction lands on exactly one side

use std::collections::BTreeSet;

use chrono::NaiveDate;
use ledgerline_shared::types::{ChargeId, Currency, FinancialEntityId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::fee::split_fee;
use super::interest::identify_interest;
use crate::charge::Transaction;

/// Strategy for (group, amount-in-cents, is_fee) triples over a few groups.
fn transaction_specs() -> impl Strategy<Value = Vec<(u8, i64, bool)>> {
    prop::collection::vec((0u8..4, -100_000i64..100_000i64, any::<bool>()), 0..20)
}

fn build(specs: &[(u8, i64, bool)]) -> Vec<Transaction> {
    let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    specs
        .iter()
        .map(|&(group, cents, is_fee)| Transaction {
            is_fee,
            ..Transaction::new(
                ChargeId::from_uuid(Uuid::from_u128(u128::from(group) + 1)),
                FinancialEntityId::new(),
                None,
                Decimal::new(cents, 2),
                Currency::Ils,
                date,
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* set of grouped transactions, each group with more than one transaction keeps
    /// exactly one principal, the principal has the largest magnitude of its group and is the
    /// first such transaction in input order.
    #[test]
    fn prop_interest_split_largest_is_principal(specs in transaction_specs()) {
        let transactions = build(&specs);
        let interest = identify_interest(&transactions, |t| t.charge_id, |t| t.amount);

        let groups: BTreeSet<_> = transactions.iter().map(|t| t.charge_id).collect();
        let mut expected_interest = 0;
        for group in groups {
            let members: Vec<_> = transactions.iter().filter(|t| t.charge_id == group).collect();
            if members.len() < 2 {
                prop_assert!(members.iter().all(|t| !interest.contains(&t.id)));
                continue;
            }
            expected_interest += members.len() - 1;

            let max = members.iter().map(|t| t.amount.abs()).max().unwrap_or_default();
            let principal: Vec<_> = members.iter().filter(|t| !interest.contains(&t.id)).collect();
            prop_assert_eq!(principal.len(), 1);
            prop_assert_eq!(principal[0].amount.abs(), max);

            let first_max = members.iter().find(|t| t.amount.abs() == max).map(|t| t.id);
            prop_assert_eq!(Some(principal[0].id), first_max);
        }
        prop_assert_eq!(interest.len(), expected_interest);
    }

    /// *For any* transactions, the fee split is a partition by the fee flag.
    #[test]
    fn prop_fee_split_partitions(specs in transaction_specs()) {
        let transactions = build(&specs);
        let split = split_fee(&transactions);

        prop_assert_eq!(split.fee.len() + split.main.len(), transactions.len());
        prop_assert!(split.fee.iter().all(|t| t.is_fee));
        prop_assert!(split.main.iter().all(|t| !t.is_fee));
    }
}
