//! Double-entry ledger records.
//!
//! - Ledger records with two credit and two debit slots
//! - Structural validation applied to every generated record

pub mod record;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use record::{AccountantApproval, LedgerRecord, LedgerSlot, SlotPosition};
pub use validation::{LedgerValidationError, validate_record};
