//! Repository traits for the external collaborators of the ledger engine.
//!
//! These traits are implemented by whatever storage backs a deployment;
//! `InMemoryLedgerStore` implements all three for tests and fixture runs.

use ledgerline_shared::AppResult;
use ledgerline_shared::types::{ChargeId, OwnerId};

use crate::charge::ChargeSnapshot;
use crate::context::AdminContext;
use crate::ledger::LedgerRecord;

/// Loads a charge with its transactions, documents and business trip.
pub trait ChargeLoader: Send + Sync {
    /// Load one charge.
    fn load_charge(&self, charge_id: ChargeId) -> AppResult<ChargeSnapshot>;
}

/// Loads the admin configuration of an owner.
pub trait AdminContextLoader: Send + Sync {
    /// Load the context of the charge owner.
    fn load_admin_context(&self, owner_id: OwnerId) -> AppResult<AdminContext>;
}

/// Stores generated ledger records.
pub trait LedgerSink: Send + Sync {
    /// Replace every record of a charge with `records`.
    ///
    /// Must be atomic per charge: readers see either the old set or the new one.
    fn replace_charge_records(&self, charge_id: ChargeId, records: &[LedgerRecord])
    -> AppResult<()>;
}
