//! Exchange-rate lookup.
//!
//! Lookup priority of `RateTable`:
//! 1. Direct rate (`from` -> `to`), most recent on or before the date
//! 2. Inverse rate (`to` -> `from`, then invert)
//! 3. Triangulation through USD

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use ledgerline_shared::types::Currency;
use rust_decimal::Decimal;

use super::exchange::ExchangeRate;

/// Source of exchange rates by date.
pub trait ExchangeRates: Send + Sync {
    /// Returns how many `to` one unit of `from` was worth on `date`.
    fn rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal>;
}

impl<F> ExchangeRates for F
where
    F: Fn(Currency, Currency, NaiveDate) -> Option<Decimal> + Send + Sync,
{
    fn rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal> {
        self(from, to, date)
    }
}

/// Looks up a rate, answering 1 for identical currencies without asking the provider.
#[must_use]
pub fn lookup_rate(
    rates: &dyn ExchangeRates,
    from: Currency,
    to: Currency,
    date: NaiveDate,
) -> Option<Decimal> {
    if from == to {
        return Some(Decimal::ONE);
    }
    rates.rate(from, to, date)
}

/// In-memory table of dated exchange rates.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(Currency, Currency), BTreeMap<NaiveDate, Decimal>>,
}

impl RateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rate, replacing any rate of the same pair and date.
    pub fn insert(&mut self, rate: ExchangeRate) {
        self.rates
            .entry((rate.from, rate.to))
            .or_default()
            .insert(rate.effective_date, rate.rate);
    }

    /// Number of stored rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no rate is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recent stored rate of the pair on or before `date`.
    #[must_use]
    pub fn direct(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<ExchangeRate> {
        self.rates
            .get(&(from, to))?
            .range(..=date)
            .next_back()
            .map(|(effective_date, rate)| ExchangeRate::new(from, to, *rate, *effective_date))
    }

    fn with_inverse(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal> {
        self.direct(from, to, date)
            .or_else(|| self.direct(to, from, date)?.inverse())
            .map(|rate| rate.rate)
    }
}

impl FromIterator<ExchangeRate> for RateTable {
    fn from_iter<I: IntoIterator<Item = ExchangeRate>>(iter: I) -> Self {
        let mut table = Self::new();
        for rate in iter {
            table.insert(rate);
        }
        table
    }
}

impl ExchangeRates for RateTable {
    fn rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }
        if let Some(rate) = self.with_inverse(from, to, date) {
            return Some(rate);
        }
        if from == Currency::Usd || to == Currency::Usd {
            return None;
        }
        let to_usd = self.with_inverse(from, Currency::Usd, date)?;
        let from_usd = self.with_inverse(Currency::Usd, to, date)?;
        to_usd.checked_mul(from_usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    fn table() -> RateTable {
        [
            ExchangeRate::new(Currency::Usd, Currency::Ils, dec!(3.7), date(1)),
            ExchangeRate::new(Currency::Usd, Currency::Ils, dec!(3.75), date(5)),
            ExchangeRate::new(Currency::Ils, Currency::Eur, dec!(0.25), date(1)),
            ExchangeRate::new(Currency::Usd, Currency::Gbp, dec!(0.8), date(1)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_direct_rate_most_recent_on_or_before() {
        let table = table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.rate(Currency::Usd, Currency::Ils, date(1)), Some(dec!(3.7)));
        assert_eq!(table.rate(Currency::Usd, Currency::Ils, date(4)), Some(dec!(3.7)));
        assert_eq!(table.rate(Currency::Usd, Currency::Ils, date(9)), Some(dec!(3.75)));
    }

    #[test]
    fn test_no_rate_before_first_date() {
        let table = table();
        let early = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(table.rate(Currency::Usd, Currency::Ils, early), None);
    }

    #[test]
    fn test_inverse_rate() {
        let table = table();
        assert_eq!(table.rate(Currency::Eur, Currency::Ils, date(2)), Some(dec!(4)));
    }

    #[test]
    fn test_direct_keeps_effective_date() {
        let table = table();
        let rate = table.direct(Currency::Usd, Currency::Ils, date(9)).unwrap();
        assert_eq!(rate.effective_date, date(5));
        assert_eq!(rate.rate, dec!(3.75));
        assert!(table.direct(Currency::Ils, Currency::Usd, date(9)).is_none());
    }

    #[test]
    fn test_zero_stored_rate_has_no_inverse() {
        let mut table = table();
        table.insert(ExchangeRate::new(Currency::Jpy, Currency::Ils, Decimal::ZERO, date(1)));
        assert_eq!(table.rate(Currency::Jpy, Currency::Ils, date(2)), Some(Decimal::ZERO));
        assert_eq!(table.rate(Currency::Ils, Currency::Jpy, date(2)), None);
    }

    #[test]
    fn test_triangulated_through_usd() {
        let table = table();
        // GBP -> USD = 1 / 0.8 = 1.25, USD -> ILS = 3.7
        assert_eq!(
            table.rate(Currency::Gbp, Currency::Ils, date(2)),
            Some(dec!(4.625))
        );
        assert_eq!(table.rate(Currency::Jpy, Currency::Ils, date(2)), None);
    }

    #[test]
    fn test_same_currency() {
        let empty = RateTable::new();
        assert!(empty.is_empty());
        assert_eq!(empty.rate(Currency::Eth, Currency::Eth, date(1)), Some(Decimal::ONE));
        let never = |_: Currency, _: Currency, _: NaiveDate| Some(dec!(2));
        assert_eq!(lookup_rate(&never, Currency::Usd, Currency::Usd, date(1)), Some(Decimal::ONE));
        assert_eq!(lookup_rate(&never, Currency::Usd, Currency::Ils, date(1)), Some(dec!(2)));
    }
}
