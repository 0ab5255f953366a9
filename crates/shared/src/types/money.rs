//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount, signed where direction matters.
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
}

/// Currencies the books are kept in, fiat and crypto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Israeli New Shekel
    Ils,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Pound Sterling
    Gbp,
    /// Canadian Dollar
    Cad,
    /// Japanese Yen
    Jpy,
    /// Australian Dollar
    Aud,
    /// Swedish Krona
    Sek,
    /// USD Coin
    Usdc,
    /// The Graph
    Grt,
    /// Ether
    Eth,
}

impl Currency {
    /// Every supported currency, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Ils,
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Cad,
        Self::Jpy,
        Self::Aud,
        Self::Sek,
        Self::Usdc,
        Self::Grt,
        Self::Eth,
    ];

    /// Number of decimal places amounts in this currency are rounded to.
    #[must_use]
    pub const fn decimal_places(self) -> u32 {
        if self.is_crypto() {
            8
        } else if matches!(self, Self::Jpy) {
            0
        } else {
            2
        }
    }

    /// Returns true for crypto assets.
    #[must_use]
    pub const fn is_crypto(self) -> bool {
        matches!(self, Self::Usdc | Self::Grt | Self::Eth)
    }

    /// ISO 4217 code (or ticker for crypto).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ils => "ILS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Jpy => "JPY",
            Self::Aud => "AUD",
            Self::Sek => "SEK",
            Self::Usdc => "USDC",
            Self::Grt => "GRT",
            Self::Eth => "ETH",
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns the absolute value, same currency.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.amount.abs(), self.currency)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| format!("Unknown currency: {s}"))
    }
}
