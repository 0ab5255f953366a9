//! In-memory collaborators, loadable from a JSON fixture.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use ledgerline_shared::types::{ChargeId, OwnerId};
use ledgerline_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use super::repository::{AdminContextLoader, ChargeLoader, LedgerSink};
use crate::charge::ChargeSnapshot;
use crate::context::AdminContext;
use crate::currency::{ExchangeRate, RateTable};
use crate::ledger::LedgerRecord;

/// Charges, admin contexts and ledger records held in memory.
///
/// Implements every engine collaborator. Owners without a context of their own fall back
/// to the default context, if one is set.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    charges: RwLock<HashMap<ChargeId, ChargeSnapshot>>,
    contexts: RwLock<HashMap<OwnerId, AdminContext>>,
    default_context: Option<AdminContext>,
    records: RwLock<HashMap<ChargeId, Vec<LedgerRecord>>>,
}

impl InMemoryLedgerStore {
    /// Creates an empty store without a default context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose owners all share `context` unless given their own.
    #[must_use]
    pub fn with_default_context(context: AdminContext) -> Self {
        Self {
            default_context: Some(context),
            ..Self::default()
        }
    }

    /// Adds or replaces a charge.
    pub fn insert_charge(&self, snapshot: ChargeSnapshot) {
        self.charges
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(snapshot.charge.id, snapshot);
    }

    /// Sets the context of one owner.
    pub fn insert_context(&self, owner_id: OwnerId, context: AdminContext) {
        self.contexts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(owner_id, context);
    }

    /// Stored records of a charge, empty if none were stored.
    #[must_use]
    pub fn records_for(&self, charge_id: ChargeId) -> Vec<LedgerRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&charge_id)
            .cloned()
            .unwrap_or_default()
    }

    /// IDs of every stored charge, sorted.
    #[must_use]
    pub fn charge_ids(&self) -> Vec<ChargeId> {
        let mut ids: Vec<_> = self
            .charges
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }
}

impl ChargeLoader for InMemoryLedgerStore {
    fn load_charge(&self, charge_id: ChargeId) -> AppResult<ChargeSnapshot> {
        self.charges
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&charge_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Charge {charge_id}")))
    }
}

impl AdminContextLoader for InMemoryLedgerStore {
    fn load_admin_context(&self, owner_id: OwnerId) -> AppResult<AdminContext> {
        self.contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&owner_id)
            .or(self.default_context.as_ref())
            .cloned()
            .ok_or_else(|| {
                AppError::Configuration(format!("No admin context for owner {owner_id}"))
            })
    }
}

impl LedgerSink for InMemoryLedgerStore {
    fn replace_charge_records(
        &self,
        charge_id: ChargeId,
        records: &[LedgerRecord],
    ) -> AppResult<()> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(charge_id, records.to_vec());
        Ok(())
    }
}

/// Charges and exchange rates as stored in a JSON fixture file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    /// Charge snapshots.
    #[serde(default)]
    pub charges: Vec<ChargeSnapshot>,
    /// Dated exchange rates.
    #[serde(default)]
    pub rates: Vec<ExchangeRate>,
}

impl Fixture {
    /// Parses a fixture from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a fixture.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds a store sharing `context` across owners, and the rate table.
    ///
    /// Charge snapshots are normalized on the way in.
    #[must_use]
    pub fn into_parts(self, context: AdminContext) -> (InMemoryLedgerStore, RateTable) {
        let store = InMemoryLedgerStore::with_default_context(context);
        for snapshot in self.charges {
            store.insert_charge(snapshot.normalized());
        }
        (store, self.rates.into_iter().collect())
    }
}
