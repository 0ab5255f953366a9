//! Archetypes booked as plain transaction records under the fee policy.

use super::draft::build_all;
use super::fees::payment_drafts;
use super::types::{GenerationInput, GeneratorOutput};
use crate::error::GenerationError;

fn transaction_records(
    input: &GenerationInput<'_>,
    label: &str,
) -> Result<GeneratorOutput, GenerationError> {
    let drafts = payment_drafts(input, label, None)?;
    Ok(GeneratorOutput::from_records(build_all(drafts, input)?))
}

/// Generates the ledger of a salary charge.
///
/// # Errors
///
/// Returns fee, counterparty or conversion errors.
pub fn salary(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    transaction_records(input, "Salary")
}

/// Generates the ledger of a transfer between the owner's wallets.
///
/// # Errors
///
/// Returns fee, counterparty or conversion errors.
pub fn internal_transfer(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    transaction_records(input, "Internal transfer")
}

/// Generates the ledger of a monthly VAT payment.
///
/// Transactions without a counterparty are booked against the VAT authority.
///
/// # Errors
///
/// Returns `MissingConfiguration` if the VAT authority is not configured, and fee or
/// conversion errors.
pub fn monthly_vat(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    let authority = input.require(input.context.vat_business_id, "vat_business_id")?;
    let drafts = payment_drafts(input, "Monthly VAT payment", Some(authority))?;
    Ok(GeneratorOutput::from_records(build_all(drafts, input)?))
}

/// Generates the ledger of a credit card settlement.
///
/// # Errors
///
/// Returns fee, counterparty or conversion errors.
pub fn creditcard_bank(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    transaction_records(input, "Credit card settlement")
}

/// Generates the ledger of a financial charge.
///
/// # Errors
///
/// Returns fee, counterparty or conversion errors.
pub fn financial(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    transaction_records(input, "Financial charge")
}
