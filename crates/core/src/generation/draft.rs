//! Record drafts: signed legs turned into ledger records.

use chrono::NaiveDate;
use ledgerline_shared::types::{Currency, FinancialEntityId};
use rust_decimal::Decimal;

use super::types::GenerationInput;
use crate::currency::to_local;
use crate::error::GenerationError;
use crate::ledger::{LedgerRecord, LedgerSlot, SlotPosition};

/// One side of a record: positive amounts are debits, negative amounts are credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// Business, account or tax category.
    pub entity: FinancialEntityId,
    /// Signed amount in the draft's currency.
    pub amount: Decimal,
}

/// A ledger record before currency conversion and slot assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Legs in insertion order.
    pub legs: Vec<Leg>,
    /// Currency the leg amounts are in.
    pub currency: Currency,
    /// Accrual date.
    pub invoice_date: Option<NaiveDate>,
    /// Cash date.
    pub value_date: Option<NaiveDate>,
    /// Date of the exchange rate used for local amounts.
    pub rate_date: NaiveDate,
    /// Description.
    pub description: Option<String>,
    /// External reference.
    pub reference: Option<String>,
    /// Owner account the money moved on, for transaction drafts.
    pub account_entity: Option<FinancialEntityId>,
    /// Whether a supplemental fee was already folded in.
    pub absorbed_fee: bool,
}

impl RecordDraft {
    /// Creates a draft without legs.
    #[must_use]
    pub const fn new(
        currency: Currency,
        invoice_date: Option<NaiveDate>,
        value_date: Option<NaiveDate>,
        rate_date: NaiveDate,
    ) -> Self {
        Self {
            legs: Vec::new(),
            currency,
            invoice_date,
            value_date,
            rate_date,
            description: None,
            reference: None,
            account_entity: None,
            absorbed_fee: false,
        }
    }

    /// Appends a leg.
    #[must_use]
    pub fn leg(mut self, entity: FinancialEntityId, amount: Decimal) -> Self {
        self.legs.push(Leg { entity, amount });
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the external reference.
    #[must_use]
    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference;
        self
    }

    /// Legs with equal entities merged and zero legs dropped, in first-seen order.
    #[must_use]
    pub fn net_legs(&self) -> Vec<Leg> {
        let mut merged: Vec<Leg> = Vec::with_capacity(self.legs.len());
        for leg in &self.legs {
            match merged.iter_mut().find(|m| m.entity == leg.entity) {
                Some(existing) => existing.amount += leg.amount,
                None => merged.push(*leg),
            }
        }
        merged.retain(|leg| !leg.amount.is_zero());
        merged
    }

    /// Converts the draft into a ledger record.
    ///
    /// # Errors
    ///
    /// - `RecordOverflow` if a side needs more than two entities
    /// - `MissingExchangeRate` if a foreign-currency draft has no rate for its rate date
    pub fn build(self, input: &GenerationInput<'_>) -> Result<LedgerRecord, GenerationError> {
        let legs = self.net_legs();
        let (debits, credits): (Vec<Leg>, Vec<Leg>) =
            legs.into_iter().partition(|leg| leg.amount.is_sign_positive());
        if debits.len() > 2 || credits.len() > 2 {
            return Err(GenerationError::RecordOverflow {
                charge_id: input.charge_id(),
            });
        }

        let mut debit_slots = self.slots(&debits, input)?;
        let mut credit_slots = self.slots(&credits, input)?;
        absorb_rounding(&mut debit_slots, &mut credit_slots);

        let charge = input.charge();
        let mut record = LedgerRecord::empty(charge.id, charge.owner_id);
        let positions = [
            (SlotPosition::Debit1, debit_slots.first()),
            (SlotPosition::Debit2, debit_slots.get(1)),
            (SlotPosition::Credit1, credit_slots.first()),
            (SlotPosition::Credit2, credit_slots.get(1)),
        ];
        for (position, slot) in positions {
            if let Some(slot) = slot {
                *record.slot_mut(position) = *slot;
            }
        }

        record.currency = Some(self.currency);
        record.invoice_date = self.invoice_date;
        record.value_date = self.value_date;
        record.description = self.description;
        record.reference = self.reference;
        Ok(record)
    }

    fn slots(
        &self,
        legs: &[Leg],
        input: &GenerationInput<'_>,
    ) -> Result<Vec<LedgerSlot>, GenerationError> {
        legs.iter().map(|leg| self.slot(leg, input)).collect()
    }

    fn slot(&self, leg: &Leg, input: &GenerationInput<'_>) -> Result<LedgerSlot, GenerationError> {
        let amount = leg.amount.abs();
        let local_currency = input.local_currency();
        if self.currency == local_currency {
            return Ok(LedgerSlot::local(leg.entity, amount));
        }
        let local = to_local(amount, self.currency, local_currency, self.rate_date, input.rates)?;
        Ok(LedgerSlot::foreign(leg.entity, local, amount))
    }
}

/// Moves the local rounding residue onto the largest slot of the side with more entities.
///
/// Each leg is rounded on its own, so a side split across two entities can drift
/// from the single-entity side by a unit.
fn absorb_rounding(debits: &mut [LedgerSlot], credits: &mut [LedgerSlot]) {
    if debits.is_empty() || credits.is_empty() {
        return;
    }
    let total = |slots: &[LedgerSlot]| slots.iter().filter_map(|s| s.local_amount).sum::<Decimal>();
    let residue = total(&*debits) - total(&*credits);
    if residue.is_zero() {
        return;
    }
    let (side, adjustment) = if debits.len() >= credits.len() {
        (debits, -residue)
    } else {
        (credits, residue)
    };
    if let Some(largest) = side.iter_mut().max_by_key(|s| s.local_amount) {
        largest.local_amount = largest.local_amount.map(|amount| amount + adjustment);
    }
}

/// Builds every draft with at least one non-zero leg, stopping at the first failure.
///
/// # Errors
///
/// Returns the first error of `RecordDraft::build`.
pub fn build_all(
    drafts: Vec<RecordDraft>,
    input: &GenerationInput<'_>,
) -> Result<Vec<LedgerRecord>, GenerationError> {
    drafts
        .into_iter()
        .filter(|draft| !draft.net_legs().is_empty())
        .map(|draft| draft.build(input))
        .collect()
}
