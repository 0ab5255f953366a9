//! Fee policy: fundamental fees get their own record, supplemental fees fold into a main one.

use ledgerline_shared::types::BusinessId;

use super::draft::{Leg, RecordDraft};
use super::transactions::{counterparty, transaction_draft};
use super::types::GenerationInput;
use crate::charge::Transaction;
use crate::error::GenerationError;
use crate::split::{FeeKind, fee_kind, split_fee};

const FEE_LABEL: &str = "Fee";

/// One draft per main transaction.
///
/// `fallback` is used as counterparty for transactions without one.
///
/// # Errors
///
/// Returns `MissingBusinessId` for a transaction without counterparty when there is no fallback.
pub fn main_drafts(
    main: &[&Transaction],
    label: &str,
    fallback: Option<BusinessId>,
) -> Result<Vec<RecordDraft>, GenerationError> {
    main.iter()
        .map(|transaction| {
            let business = match fallback {
                Some(fallback) => transaction.business_id.unwrap_or(fallback),
                None => counterparty(transaction)?,
            };
            Ok(transaction_draft(transaction, business, label))
        })
        .collect()
}

/// Applies fee transactions to the main drafts.
///
/// Fundamental fee records are appended after the main drafts in fee order. A supplemental
/// fee attaches to the first main draft on the same account and currency that has not
/// absorbed a fee yet, else to the first such draft in the same currency.
///
/// # Errors
///
/// - `MissingBusinessId` / `UnclassifiedFeeBusiness` if a fee cannot be categorized
/// - `UnattachedSupplementalFee` if no main draft can take a supplemental fee
pub fn apply_fees(
    drafts: &mut Vec<RecordDraft>,
    fees: &[&Transaction],
    input: &GenerationInput<'_>,
) -> Result<(), GenerationError> {
    let mut fundamental = Vec::new();

    for fee in fees {
        let business = counterparty(fee)?;
        match fee_kind(fee, input.context)? {
            FeeKind::Fundamental => fundamental.push(transaction_draft(fee, business, FEE_LABEL)),
            FeeKind::Supplemental => {
                let target = drafts
                    .iter()
                    .position(|d| {
                        !d.absorbed_fee
                            && d.currency == fee.currency
                            && d.account_entity == Some(fee.account_entity_id)
                    })
                    .or_else(|| {
                        drafts
                            .iter()
                            .position(|d| !d.absorbed_fee && d.currency == fee.currency)
                    })
                    .ok_or(GenerationError::UnattachedSupplementalFee {
                        transaction_id: fee.id,
                    })?;

                let draft = &mut drafts[target];
                draft.legs.push(Leg {
                    entity: fee.account_entity_id,
                    amount: fee.amount,
                });
                draft.legs.push(Leg {
                    entity: business,
                    amount: -fee.amount,
                });
                draft.absorbed_fee = true;
            }
        }
    }

    drafts.extend(fundamental);
    Ok(())
}

/// Drafts for all transactions of the charge under the fee policy.
///
/// # Errors
///
/// Returns the errors of `main_drafts` and `apply_fees`.
pub fn payment_drafts(
    input: &GenerationInput<'_>,
    label: &str,
    fallback: Option<BusinessId>,
) -> Result<Vec<RecordDraft>, GenerationError> {
    let split = split_fee(&input.snapshot.transactions);
    let mut drafts = main_drafts(&split.main, label, fallback)?;
    apply_fees(&mut drafts, &split.fee, input)?;
    Ok(drafts)
}
