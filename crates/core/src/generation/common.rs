//! Common charges: document accruals followed by payments.

use super::documents::document_drafts;
use super::draft::build_all;
use super::fees::payment_drafts;
use super::types::{GenerationInput, GeneratorOutput};
use crate::error::GenerationError;

/// Generates the ledger of a common charge.
///
/// # Errors
///
/// Returns the first document, fee or conversion error.
pub fn generate(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    let mut drafts = document_drafts(input)?;
    drafts.extend(payment_drafts(input, "Payment", None)?);
    Ok(GeneratorOutput::from_records(build_all(drafts, input)?))
}
