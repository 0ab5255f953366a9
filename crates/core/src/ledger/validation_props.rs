//! Property-based tests for ledger record validation.
//!
//! - Validator completeness: a record is rejected exactly when one of the rules fails
//! - Short-circuit order: the reported violation is the first failing rule

use chrono::NaiveDate;
use ledgerline_shared::types::{ChargeId, Currency, FinancialEntityId, OwnerId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::record::{LedgerRecord, LedgerSlot};
use super::validation::{LedgerValidationError, validate_record};

const DEFAULT_CURRENCY: Currency = Currency::Ils;

/// Strategy for a slot where every field is independently present or absent.
fn slot_strategy() -> impl Strategy<Value = LedgerSlot> {
    (
        any::<bool>(),
        prop::option::of((1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2))),
        prop::option::of((1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2))),
    )
        .prop_map(|(has_entity, local_amount, foreign_amount)| LedgerSlot {
            entity: has_entity.then(FinancialEntityId::new),
            local_amount,
            foreign_amount,
        })
}

fn date_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((1u32..28).prop_map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap()))
}

fn currency_strategy() -> impl Strategy<Value = Option<Currency>> {
    prop::option::of(prop::sample::select(Currency::ALL.to_vec()))
}

fn record_strategy() -> impl Strategy<Value = LedgerRecord> {
    (
        prop::array::uniform4(slot_strategy()),
        currency_strategy(),
        date_strategy(),
        date_strategy(),
    )
        .prop_map(|([credit1, credit2, debit1, debit2], currency, invoice_date, value_date)| {
            LedgerRecord {
                credit1,
                credit2,
                debit1,
                debit2,
                currency,
                invoice_date,
                value_date,
                ..LedgerRecord::empty(ChargeId::new(), OwnerId::new())
            }
        })
}

/// Independent statement of each rule, in validation order.
fn rules_hold(record: &LedgerRecord) -> [bool; 5] {
    let is_local = record.currency.is_none_or(|c| c == DEFAULT_CURRENCY);
    let slots: Vec<_> = record.slots().map(|(_, s)| *s).collect();
    [
        record.credit1.entity.is_some() || record.debit1.entity.is_some(),
        record.invoice_date.is_some(),
        record.value_date.is_some(),
        slots
            .iter()
            .all(|s| s.entity.is_some() == s.local_amount.is_some()),
        slots
            .iter()
            .filter(|s| s.entity.is_some())
            .all(|s| s.foreign_amount.is_some() != is_local),
    ]
}

const fn rule_of(error: &LedgerValidationError) -> usize {
    match error {
        LedgerValidationError::NoSide => 0,
        LedgerValidationError::MissingInvoiceDate => 1,
        LedgerValidationError::MissingValueDate => 2,
        LedgerValidationError::EntityWithoutAmount { .. }
        | LedgerValidationError::AmountWithoutEntity { .. } => 3,
        LedgerValidationError::UnexpectedForeignAmount { .. }
        | LedgerValidationError::MissingForeignAmount { .. } => 4,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// *For any* record, validation fails exactly when some rule is violated,
    /// and the reported error belongs to the first violated rule.
    #[test]
    fn prop_validator_complete_and_ordered(record in record_strategy()) {
        let holds = rules_hold(&record);
        let first_violation = holds.iter().position(|ok| !ok);

        match (validate_record(&record, DEFAULT_CURRENCY), first_violation) {
            (Ok(()), None) => {}
            (Err(error), Some(rule)) => prop_assert_eq!(rule_of(&error), rule),
            (result, expected) => prop_assert!(
                false,
                "validator returned {:?}, first violated rule {:?}",
                result,
                expected
            ),
        }
    }

    /// *For any* well-formed foreign-currency record, validation accepts it.
    #[test]
    fn prop_complete_foreign_record_accepted(
        local in (1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2)),
        foreign in (1i64..10_000_000i64).prop_map(|c| Decimal::new(c, 2)),
        date in (1u32..28).prop_map(|d| NaiveDate::from_ymd_opt(2024, 2, d).unwrap()),
    ) {
        let record = LedgerRecord {
            debit1: LedgerSlot::foreign(FinancialEntityId::new(), local, foreign),
            credit1: LedgerSlot::foreign(FinancialEntityId::new(), local, foreign),
            currency: Some(Currency::Usd),
            invoice_date: Some(date),
            value_date: Some(date),
            ..LedgerRecord::empty(ChargeId::new(), OwnerId::new())
        };
        prop_assert_eq!(validate_record(&record, DEFAULT_CURRENCY), Ok(()));
    }
}
