//! Bank deposit charges: principal movement and accrued interest.

use super::draft::build_all;
use super::transactions::transaction_draft;
use super::types::{GenerationInput, GeneratorOutput};
use crate::error::GenerationError;
use crate::split::identify_interest;

/// Generates the ledger of a bank deposit charge.
///
/// The largest transaction of the charge is the principal movement, booked against the bank
/// deposit business. Every other transaction is interest, booked against the interest category.
///
/// # Errors
///
/// Returns `MissingConfiguration` if the deposit business is not configured, or if interest
/// exists and the interest category is not configured.
pub fn generate(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    let transactions = &input.snapshot.transactions;
    let deposit = input.require(
        input.context.bank_deposit_business_id,
        "bank_deposit_business_id",
    )?;
    let interest = identify_interest(transactions, |t| t.charge_id, |t| t.amount);

    let drafts = transactions
        .iter()
        .map(|transaction| {
            if interest.contains(&transaction.id) {
                let category = input.require(
                    input.context.bank_deposit_interest_tax_category_id,
                    "bank_deposit_interest_tax_category_id",
                )?;
                Ok(transaction_draft(transaction, category, "Bank deposit interest"))
            } else if transaction.amount.is_sign_negative() {
                Ok(transaction_draft(transaction, deposit, "Bank deposit"))
            } else {
                Ok(transaction_draft(transaction, deposit, "Bank deposit withdrawal"))
            }
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    Ok(GeneratorOutput::from_records(build_all(drafts, input)?))
}
