//! Ledger record: one double-entry row with up to two entities per side.

use chrono::NaiveDate;
use ledgerline_shared::types::{ChargeId, Currency, FinancialEntityId, OwnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the four entity slots of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    /// First credit entity.
    Credit1,
    /// Second credit entity.
    Credit2,
    /// First debit entity.
    Debit1,
    /// Second debit entity.
    Debit2,
}

impl SlotPosition {
    /// All slots in validation order.
    pub const ALL: [Self; 4] = [Self::Credit1, Self::Credit2, Self::Debit1, Self::Debit2];

    /// Returns true for the credit slots.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Credit1 | Self::Credit2)
    }
}

impl std::fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Credit1 => "credit_entity1",
            Self::Credit2 => "credit_entity2",
            Self::Debit1 => "debit_entity1",
            Self::Debit2 => "debit_entity2",
        };
        f.write_str(name)
    }
}

/// An entity slot with its amounts.
///
/// All fields are optional so that malformed drafts can be represented and rejected
/// by the validator instead of being unrepresentable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSlot {
    /// Business, account or tax category.
    pub entity: Option<FinancialEntityId>,
    /// Amount in the default local currency.
    pub local_amount: Option<Decimal>,
    /// Amount in the record's currency, when it is not the local one.
    pub foreign_amount: Option<Decimal>,
}

impl LedgerSlot {
    /// Slot carrying only a local amount.
    #[must_use]
    pub const fn local(entity: FinancialEntityId, amount: Decimal) -> Self {
        Self {
            entity: Some(entity),
            local_amount: Some(amount),
            foreign_amount: None,
        }
    }

    /// Slot carrying both a local and a foreign amount.
    #[must_use]
    pub const fn foreign(entity: FinancialEntityId, local: Decimal, foreign: Decimal) -> Self {
        Self {
            entity: Some(entity),
            local_amount: Some(local),
            foreign_amount: Some(foreign),
        }
    }

    /// Returns true if nothing is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entity.is_none() && self.local_amount.is_none() && self.foreign_amount.is_none()
    }
}

/// Accountant review state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountantApproval {
    /// Not reviewed yet. Every generated record starts here.
    #[default]
    Pending,
    /// Approved by the accountant.
    Approved,
}

/// A double-entry ledger record.
///
/// Records are produced fresh on every generation run and never mutated afterwards;
/// regeneration replaces the full set for a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Charge the record was generated for.
    pub charge_id: ChargeId,
    /// Owner of the charge.
    pub owner_id: OwnerId,
    /// First credit slot.
    pub credit1: LedgerSlot,
    /// Second credit slot.
    pub credit2: LedgerSlot,
    /// First debit slot.
    pub debit1: LedgerSlot,
    /// Second debit slot.
    pub debit2: LedgerSlot,
    /// Currency of the foreign amounts; `None` means the default currency.
    pub currency: Option<Currency>,
    /// Accrual date.
    pub invoice_date: Option<NaiveDate>,
    /// Cash date.
    pub value_date: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
    /// External reference, usually a document serial number.
    pub reference: Option<String>,
    /// Review state.
    pub accountant_approval: AccountantApproval,
}

impl LedgerRecord {
    /// Creates a record with no slots, dates or description.
    #[must_use]
    pub fn empty(charge_id: ChargeId, owner_id: OwnerId) -> Self {
        Self {
            charge_id,
            owner_id,
            credit1: LedgerSlot::default(),
            credit2: LedgerSlot::default(),
            debit1: LedgerSlot::default(),
            debit2: LedgerSlot::default(),
            currency: None,
            invoice_date: None,
            value_date: None,
            description: None,
            reference: None,
            accountant_approval: AccountantApproval::Pending,
        }
    }

    /// Returns the slot at a position.
    #[must_use]
    pub const fn slot(&self, position: SlotPosition) -> &LedgerSlot {
        match position {
            SlotPosition::Credit1 => &self.credit1,
            SlotPosition::Credit2 => &self.credit2,
            SlotPosition::Debit1 => &self.debit1,
            SlotPosition::Debit2 => &self.debit2,
        }
    }

    /// Returns the slot at a position mutably.
    pub fn slot_mut(&mut self, position: SlotPosition) -> &mut LedgerSlot {
        match position {
            SlotPosition::Credit1 => &mut self.credit1,
            SlotPosition::Credit2 => &mut self.credit2,
            SlotPosition::Debit1 => &mut self.debit1,
            SlotPosition::Debit2 => &mut self.debit2,
        }
    }

    /// Iterates the slots in validation order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotPosition, &LedgerSlot)> {
        SlotPosition::ALL.into_iter().map(move |p| (p, self.slot(p)))
    }

    /// Sum of credit local amounts.
    #[must_use]
    pub fn credit_total(&self) -> Decimal {
        self.side_total(true)
    }

    /// Sum of debit local amounts.
    #[must_use]
    pub fn debit_total(&self) -> Decimal {
        self.side_total(false)
    }

    /// Returns true if both sides carry the same local total.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.credit_total() == self.debit_total()
    }

    fn side_total(&self, credit: bool) -> Decimal {
        self.slots()
            .filter(|(p, _)| p.is_credit() == credit)
            .filter_map(|(_, s)| s.local_amount)
            .sum()
    }
}
