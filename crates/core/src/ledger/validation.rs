//! Structural validation of ledger records before they are accepted.

use ledgerline_shared::types::Currency;
use thiserror::Error;

use super::record::{LedgerRecord, SlotPosition};

/// Structural violations of a ledger record.
///
/// Validation stops at the first violated rule, so a record reports exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerValidationError {
    /// Neither `credit_entity1` nor `debit_entity1` is set.
    #[error("Ledger record has neither a credit nor a debit entity")]
    NoSide,

    /// Invoice date is missing.
    #[error("Ledger record is missing its invoice date")]
    MissingInvoiceDate,

    /// Value date is missing.
    #[error("Ledger record is missing its value date")]
    MissingValueDate,

    /// A slot has an entity but no local amount.
    #[error("{slot} is set without a local amount")]
    EntityWithoutAmount {
        /// Offending slot.
        slot: SlotPosition,
    },

    /// A slot has a local amount but no entity.
    #[error("{slot} has a local amount without an entity")]
    AmountWithoutEntity {
        /// Offending slot.
        slot: SlotPosition,
    },

    /// A local-currency record carries a foreign amount.
    #[error("{slot} carries a foreign amount on a local-currency record")]
    UnexpectedForeignAmount {
        /// Offending slot.
        slot: SlotPosition,
    },

    /// A foreign-currency record is missing a foreign amount.
    #[error("{slot} is missing its foreign amount")]
    MissingForeignAmount {
        /// Offending slot.
        slot: SlotPosition,
    },
}

impl LedgerValidationError {
    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoSide => "LEDGER_NO_SIDE",
            Self::MissingInvoiceDate => "LEDGER_MISSING_INVOICE_DATE",
            Self::MissingValueDate => "LEDGER_MISSING_VALUE_DATE",
            Self::EntityWithoutAmount { .. } => "LEDGER_ENTITY_WITHOUT_AMOUNT",
            Self::AmountWithoutEntity { .. } => "LEDGER_AMOUNT_WITHOUT_ENTITY",
            Self::UnexpectedForeignAmount { .. } => "LEDGER_UNEXPECTED_FOREIGN_AMOUNT",
            Self::MissingForeignAmount { .. } => "LEDGER_MISSING_FOREIGN_AMOUNT",
        }
    }
}

/// Validates a ledger record against the structural bookkeeping rules.
///
/// Rules are checked in order and the first violation is returned:
/// 1. a first credit or first debit entity is set
/// 2. the invoice date is set
/// 3. the value date is set
/// 4. every slot has both an entity and a local amount, or neither
/// 5. foreign amounts are present exactly on the populated slots of a foreign-currency record
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_record(
    record: &LedgerRecord,
    default_currency: Currency,
) -> Result<(), LedgerValidationError> {
    if record.credit1.entity.is_none() && record.debit1.entity.is_none() {
        return Err(LedgerValidationError::NoSide);
    }

    if record.invoice_date.is_none() {
        return Err(LedgerValidationError::MissingInvoiceDate);
    }

    if record.value_date.is_none() {
        return Err(LedgerValidationError::MissingValueDate);
    }

    for (slot, s) in record.slots() {
        match (s.entity.is_some(), s.local_amount.is_some()) {
            (true, false) => return Err(LedgerValidationError::EntityWithoutAmount { slot }),
            (false, true) => return Err(LedgerValidationError::AmountWithoutEntity { slot }),
            _ => {}
        }
    }

    let is_local = record.currency.is_none_or(|c| c == default_currency);
    for (slot, s) in record.slots().filter(|(_, s)| s.entity.is_some()) {
        if is_local && s.foreign_amount.is_some() {
            return Err(LedgerValidationError::UnexpectedForeignAmount { slot });
        }
        if !is_local && s.foreign_amount.is_none() {
            return Err(LedgerValidationError::MissingForeignAmount { slot });
        }
    }

    Ok(())
}
