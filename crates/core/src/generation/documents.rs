//! Accrual records of invoices.

use rust_decimal::Decimal;

use super::draft::RecordDraft;
use super::types::GenerationInput;
use crate::charge::{Document, DocumentType};
use crate::error::GenerationError;

/// Direction of a document relative to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// The owner is the debtor.
    Expense,
    /// The owner is the creditor.
    Income,
}

/// Accrual drafts of every accountable document of the charge, in document order.
///
/// # Errors
///
/// - `IncompleteDocument` if a document lacks its date, amount or counterparty
/// - `MissingTaxCategory` if the charge has no accrual tax category
/// - `MissingConfiguration` if a document carries VAT and the VAT category is not configured
pub fn document_drafts(input: &GenerationInput<'_>) -> Result<Vec<RecordDraft>, GenerationError> {
    input
        .snapshot
        .documents
        .iter()
        .filter(|d| d.document_type.is_accountable())
        .map(|d| document_draft(d, input))
        .collect()
}

fn document_draft(
    document: &Document,
    input: &GenerationInput<'_>,
) -> Result<RecordDraft, GenerationError> {
    let incomplete = |field| GenerationError::IncompleteDocument {
        document_id: document.id,
        field,
    };

    let date = document.date.ok_or_else(|| incomplete("date"))?;
    let total = document.amount.ok_or_else(|| incomplete("amount"))?;
    let tax_category = input
        .charge()
        .tax_category_id
        .ok_or(GenerationError::MissingTaxCategory {
            charge_id: input.charge_id(),
        })?;

    let owner = input.context.default_admin_business_id;
    let (direction, counterparty) = if document.debtor_id == Some(owner) {
        let creditor = document.creditor_id.ok_or_else(|| incomplete("creditor_id"))?;
        (Direction::Expense, creditor)
    } else if document.creditor_id == Some(owner) {
        let debtor = document.debtor_id.ok_or_else(|| incomplete("debtor_id"))?;
        (Direction::Income, debtor)
    } else {
        return Err(incomplete("counterparty"));
    };

    let vat = document.vat_amount.unwrap_or(Decimal::ZERO);
    let net = total.amount - vat;
    // Debit side for expenses, credit side for income; credit invoices reverse both.
    let mut sign = match direction {
        Direction::Expense => Decimal::ONE,
        Direction::Income => Decimal::NEGATIVE_ONE,
    };
    if document.document_type == DocumentType::CreditInvoice {
        sign = -sign;
    }

    let mut draft = RecordDraft::new(total.currency, Some(date), Some(date), date)
        .leg(tax_category, sign * net)
        .leg(counterparty, -sign * total.amount)
        .with_description(describe(document))
        .with_reference(document.serial_number.clone());

    if !vat.is_zero() {
        let vat_category = match direction {
            Direction::Expense => input.require(
                input.context.input_vat_tax_category_id,
                "input_vat_tax_category_id",
            )?,
            Direction::Income => input.require(
                input.context.output_vat_tax_category_id,
                "output_vat_tax_category_id",
            )?,
        };
        draft = draft.leg(vat_category, sign * vat);
    }

    Ok(draft)
}

fn describe(document: &Document) -> String {
    let kind = match document.document_type {
        DocumentType::CreditInvoice => "Credit invoice",
        DocumentType::InvoiceReceipt => "Invoice receipt",
        _ => "Invoice",
    };
    match document.serial_number.as_deref() {
        Some(serial) => format!("{kind} {serial}"),
        None => kind.to_string(),
    }
}
