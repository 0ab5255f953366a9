//! Multi-currency handling and exchange rates.

pub mod cache;
pub mod conversion;
pub mod exchange;
pub mod rates;

pub use cache::CachedRates;
pub use conversion::{convert_amount, to_local};
pub use exchange::ExchangeRate;
pub use rates::{ExchangeRates, RateTable, lookup_rate};
