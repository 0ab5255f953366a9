//! Interest/principal splitting of bank deposit transactions.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use ledgerline_shared::types::TransactionId;
use rust_decimal::Decimal;

use crate::charge::Transaction;

/// Identifies interest transactions.
///
/// Groups transactions by `group_key`. In every group with more than one transaction the one
/// with the largest absolute amount is principal and all others are interest. Ties keep input
/// order, so the first-seen transaction wins as principal.
#[must_use]
pub fn identify_interest<K, G, A>(
    transactions: &[Transaction],
    group_key: G,
    amount: A,
) -> BTreeSet<TransactionId>
where
    K: Eq + Hash,
    G: Fn(&Transaction) -> K,
    A: Fn(&Transaction) -> Decimal,
{
    let mut groups: HashMap<K, Vec<&Transaction>> = HashMap::new();
    for transaction in transactions {
        groups.entry(group_key(transaction)).or_default().push(transaction);
    }

    groups
        .into_values()
        .filter(|group| group.len() > 1)
        .flat_map(|mut group| {
            // sort_by is stable
            group.sort_by(|a, b| amount(b).abs().cmp(&amount(a).abs()));
            group.into_iter().skip(1).map(|t| t.id).collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerline_shared::types::{ChargeId, Currency, FinancialEntityId};
    use rust_decimal_macros::dec;

    fn tx(charge_id: ChargeId, amount: Decimal) -> Transaction {
        Transaction::new(
            charge_id,
            FinancialEntityId::new(),
            None,
            amount,
            Currency::Ils,
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
    }

    #[test]
    fn test_largest_is_principal() {
        let charge_id = ChargeId::new();
        let a = tx(charge_id, dec!(-500));
        let b = tx(charge_id, dec!(50));
        let interest = identify_interest(&[a.clone(), b.clone()], |t| t.charge_id, |t| t.amount);
        assert_eq!(interest, BTreeSet::from([b.id]));
    }

    #[test]
    fn test_single_transaction_groups_contribute_nothing() {
        let transactions = vec![tx(ChargeId::new(), dec!(100)), tx(ChargeId::new(), dec!(3))];
        let interest = identify_interest(&transactions, |t| t.charge_id, |t| t.amount);
        assert!(interest.is_empty());
    }

    #[test]
    fn test_tie_keeps_first_seen_as_principal() {
        let charge_id = ChargeId::new();
        let transactions = vec![
            tx(charge_id, dec!(100)),
            tx(charge_id, dec!(-100)),
            tx(charge_id, dec!(2)),
        ];
        let interest = identify_interest(&transactions, |t| t.charge_id, |t| t.amount);
        assert_eq!(
            interest,
            BTreeSet::from([transactions[1].id, transactions[2].id])
        );
    }

    #[test]
    fn test_groups_are_independent() {
        let first = ChargeId::new();
        let second = ChargeId::new();
        let transactions = vec![
            tx(first, dec!(1000)),
            tx(second, dec!(7)),
            tx(first, dec!(12)),
            tx(second, dec!(-300)),
        ];
        let interest = identify_interest(&transactions, |t| t.charge_id, |t| t.amount);
        assert_eq!(
            interest,
            BTreeSet::from([transactions[2].id, transactions[1].id])
        );
    }
}
