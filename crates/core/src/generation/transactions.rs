//! Transaction records shared by every generator.

use ledgerline_shared::types::{BusinessId, FinancialEntityId};

use super::draft::RecordDraft;
use crate::charge::Transaction;
use crate::error::GenerationError;

/// Counterparty of a transaction.
///
/// # Errors
///
/// Returns `MissingBusinessId` if the transaction has none.
pub fn counterparty(transaction: &Transaction) -> Result<BusinessId, GenerationError> {
    transaction
        .business_id
        .ok_or(GenerationError::MissingBusinessId {
            transaction_id: transaction.id,
        })
}

/// Description of a transaction record: the label, followed by the bank description if any.
#[must_use]
pub fn describe(label: &str, transaction: &Transaction) -> String {
    match transaction.description.as_deref() {
        Some(text) if !text.is_empty() => format!("{label}: {text}"),
        _ => label.to_string(),
    }
}

/// Draft moving a transaction's amount between the owner account and `counterparty`.
///
/// Inflows debit the account and credit the counterparty; outflows do the opposite.
#[must_use]
pub fn transaction_draft(
    transaction: &Transaction,
    counterparty: FinancialEntityId,
    label: &str,
) -> RecordDraft {
    let mut draft = RecordDraft::new(
        transaction.currency,
        Some(transaction.event_date),
        transaction.value_date(),
        transaction.rate_date(),
    )
    .leg(transaction.account_entity_id, transaction.amount)
    .leg(counterparty, -transaction.amount)
    .with_description(describe(label, transaction));
    draft.account_entity = Some(transaction.account_entity_id);
    draft
}
