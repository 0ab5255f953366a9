//! Exchange-rate caching using Moka.
//!
//! Rates are cached per currency pair and date, shared by every worker of a batch run.

use std::time::Duration;

use chrono::NaiveDate;
use ledgerline_shared::types::Currency;
use moka::sync::Cache;
use rust_decimal::Decimal;

use super::rates::ExchangeRates;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default time-to-live for cache entries (1 hour).
const DEFAULT_TTL_SECS: u64 = 3600;

type RateKey = (Currency, Currency, NaiveDate);

/// Caching wrapper around an exchange-rate provider.
///
/// Only found rates are cached, so a rate published later is picked up on the next lookup.
pub struct CachedRates<R> {
    inner: R,
    cache: Cache<RateKey, Decimal>,
}

impl<R: ExchangeRates> CachedRates<R> {
    /// Creates a cache with default settings.
    ///
    /// Default: 10 000 entries max, 1 hour TTL.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of entries to cache
    /// * `ttl_secs` - Time-to-live in seconds for each entry
    #[must_use]
    pub fn with_config(inner: R, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        Self { inner, cache }
    }

    /// Wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.inner
    }

    /// Drops every cached rate.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}

impl<R: ExchangeRates> ExchangeRates for CachedRates<R> {
    fn rate(&self, from: Currency, to: Currency, date: NaiveDate) -> Option<Decimal> {
        let key = (from, to, date);
        if let Some(rate) = self.cache.get(&key) {
            return Some(rate);
        }
        let rate = self.inner.rate(from, to, date)?;
        self.cache.insert(key, rate);
        Some(rate)
    }
}
