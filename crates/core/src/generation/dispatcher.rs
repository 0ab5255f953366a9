//! Generator lookup and the pure classify, generate, validate pipeline.

use std::borrow::Cow;

use tracing::debug;

use super::types::{ChargeFailure, ChargeLedger, GenerationInput, GeneratorFn};
use super::{bank_deposit, business_trip, common, conversion, dividend, payments};
use crate::charge::ChargeSnapshot;
use crate::classify::{ChargeType, classify};
use crate::context::AdminContext;
use crate::currency::ExchangeRates;
use crate::error::GenerationError;
use crate::ledger::validate_record;

/// Returns the generator of an archetype.
#[must_use]
pub fn generator_for(charge_type: ChargeType) -> GeneratorFn {
    match charge_type {
        ChargeType::CommonCharge => common::generate,
        ChargeType::ConversionCharge => conversion::generate,
        ChargeType::SalaryCharge => payments::salary,
        ChargeType::InternalTransferCharge => payments::internal_transfer,
        ChargeType::DividendCharge => dividend::generate,
        ChargeType::BusinessTripCharge => business_trip::generate,
        ChargeType::MonthlyVatCharge => payments::monthly_vat,
        ChargeType::BankDepositCharge => bank_deposit::generate,
        ChargeType::CreditcardBankCharge => payments::creditcard_bank,
        ChargeType::FinancialCharge => payments::financial,
    }
}

/// Classifies a charge, runs its generator and validates every record.
///
/// Pure: no I/O besides the exchange-rate provider. A stale business array is re-derived
/// from the transactions first. A record failing validation or with unequal local sides
/// aborts the whole charge; nothing of it is returned.
///
/// # Errors
///
/// Returns a `ChargeFailure` carrying the generator error, or the first validation or
/// balance error.
pub fn generate_for_snapshot(
    snapshot: &ChargeSnapshot,
    context: &AdminContext,
    rates: &dyn ExchangeRates,
) -> Result<ChargeLedger, ChargeFailure> {
    let snapshot = if snapshot.is_normalized() {
        Cow::Borrowed(snapshot)
    } else {
        Cow::Owned(snapshot.clone().normalized())
    };
    let charge_id = snapshot.charge.id;
    let charge_type = classify(&snapshot.charge, context);
    debug!(charge_id = %charge_id, charge_type = %charge_type, "Classified charge");

    let input = GenerationInput::new(&snapshot, context, rates);
    let output = generator_for(charge_type)(&input)
        .map_err(|error| ChargeFailure::single(charge_id, Some(charge_type), error))?;

    for (record_index, record) in output.records.iter().enumerate() {
        validate_record(record, context.default_local_currency).map_err(|source| {
            ChargeFailure::single(
                charge_id,
                Some(charge_type),
                GenerationError::Validation {
                    charge_id,
                    record_index,
                    source,
                },
            )
        })?;
        if !record.is_balanced() {
            return Err(ChargeFailure::single(
                charge_id,
                Some(charge_type),
                GenerationError::UnbalancedRecord {
                    charge_id,
                    record_index,
                    debit: record.debit_total(),
                    credit: record.credit_total(),
                },
            ));
        }
    }

    Ok(ChargeLedger {
        charge_id,
        charge_type,
        records: output.records,
        errors: output.errors,
    })
}
