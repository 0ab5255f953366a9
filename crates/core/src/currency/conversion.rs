//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Always round to the local currency's decimal places
//! - Use banker's rounding (round half to even)
//! - Keep both the original and the converted amount on the record

use chrono::NaiveDate;
use ledgerline_shared::types::Currency;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use super::rates::{ExchangeRates, lookup_rate};
use crate::error::GenerationError;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount * rate;
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Converts an amount into the local currency at the rate of `date`.
///
/// Amounts already in the local currency are returned unchanged.
///
/// # Errors
///
/// Returns `MissingExchangeRate` if the provider has no rate for the date.
pub fn to_local(
    amount: Decimal,
    currency: Currency,
    local: Currency,
    date: NaiveDate,
    rates: &dyn ExchangeRates,
) -> Result<Decimal, GenerationError> {
    if currency == local {
        return Ok(amount);
    }
    let rate = lookup_rate(rates, currency, local, date).ok_or(
        GenerationError::MissingExchangeRate {
            currency,
            local,
            date,
        },
    )?;
    Ok(convert_amount(amount, rate, local.decimal_places()))
}
