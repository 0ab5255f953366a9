//! Conversion charges: one outgoing leg, one incoming leg, and the rate difference.

use rust_decimal::Decimal;

use super::draft::{RecordDraft, build_all};
use super::fees::{apply_fees, main_drafts};
use super::transactions::counterparty;
use super::types::{GenerationInput, GeneratorOutput};
use crate::charge::Transaction;
use crate::currency::to_local;
use crate::error::GenerationError;
use crate::split::split_fee;

const LABEL: &str = "Conversion";

/// Source and destination legs of a conversion.
#[derive(Debug, Clone, Copy)]
pub struct ConversionLegs<'a> {
    /// The outgoing (negative) transaction.
    pub source: &'a Transaction,
    /// The incoming (positive) transaction.
    pub destination: &'a Transaction,
}

/// Picks the two legs of a conversion out of its main transactions.
///
/// # Errors
///
/// In check order: `MultipleDestinationCurrencies`, `MultipleSourceCurrencies`,
/// `MissingConversionDestination`, `MissingConversionSource`, `SingleCurrencyConversion`.
pub fn conversion_legs<'a>(
    input: &GenerationInput<'_>,
    main: &[&'a Transaction],
) -> Result<ConversionLegs<'a>, GenerationError> {
    let charge_id = input.charge_id();
    let incoming: Vec<_> = main.iter().filter(|t| t.amount > Decimal::ZERO).collect();
    let outgoing: Vec<_> = main.iter().filter(|t| t.amount < Decimal::ZERO).collect();

    if incoming.len() > 1 {
        return Err(GenerationError::MultipleDestinationCurrencies { charge_id });
    }
    if outgoing.len() > 1 {
        return Err(GenerationError::MultipleSourceCurrencies { charge_id });
    }
    let destination = **incoming
        .first()
        .ok_or(GenerationError::MissingConversionDestination { charge_id })?;
    let source = **outgoing
        .first()
        .ok_or(GenerationError::MissingConversionSource { charge_id })?;

    if source.currency == destination.currency {
        return Err(GenerationError::SingleCurrencyConversion {
            charge_id,
            currency: source.currency,
        });
    }
    Ok(ConversionLegs {
        source,
        destination,
    })
}

/// Generates the ledger of a conversion charge.
///
/// Records: source leg, destination leg, fees, then the exchange-rate difference booked
/// against the broker when the two legs differ in local value.
///
/// # Errors
///
/// Returns the leg errors of `conversion_legs`, fee errors, missing rates, and
/// `MissingConfiguration` if a difference exists without an exchange-rate category.
pub fn generate(input: &GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError> {
    let split = split_fee(&input.snapshot.transactions);
    let legs = conversion_legs(input, &split.main)?;

    let mut drafts = main_drafts(&[legs.source, legs.destination], LABEL, None)?;
    apply_fees(&mut drafts, &split.fee, input)?;
    if let Some(difference) = difference_draft(input, &legs)? {
        drafts.push(difference);
    }

    Ok(GeneratorOutput::from_records(build_all(drafts, input)?))
}

fn difference_draft(
    input: &GenerationInput<'_>,
    legs: &ConversionLegs<'_>,
) -> Result<Option<RecordDraft>, GenerationError> {
    let local = input.local_currency();
    let local_value = |t: &Transaction| {
        to_local(t.amount.abs(), t.currency, local, t.rate_date(), input.rates)
    };
    let difference = local_value(legs.source)? - local_value(legs.destination)?;
    if difference.is_zero() {
        return Ok(None);
    }

    let category = input.require(
        input.context.exchange_rate_tax_category_id,
        "exchange_rate_tax_category_id",
    )?;
    let broker = counterparty(legs.destination)?;
    let destination = legs.destination;

    Ok(Some(
        RecordDraft::new(
            local,
            Some(destination.event_date),
            destination.value_date(),
            destination.rate_date(),
        )
        .leg(broker, -difference)
        .leg(category, difference)
        .with_description("Exchange rate difference"),
    ))
}
