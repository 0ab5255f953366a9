//! Charge archetypes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Accounting archetype of a charge. Selects the ledger generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChargeType {
    /// Anything not matched by a more specific rule.
    CommonCharge,
    /// Currency conversion.
    ConversionCharge,
    /// Payroll.
    SalaryCharge,
    /// Transfer between the owner's own wallets.
    InternalTransferCharge,
    /// Dividend payment.
    DividendCharge,
    /// Business trip expenses.
    BusinessTripCharge,
    /// Monthly VAT payment to the authority.
    MonthlyVatCharge,
    /// Bank deposit movement and interest.
    BankDepositCharge,
    /// Credit card settlement from a bank account.
    CreditcardBankCharge,
    /// Financial adjustments.
    FinancialCharge,
}

impl ChargeType {
    /// Every archetype.
    pub const ALL: [Self; 10] = [
        Self::CommonCharge,
        Self::ConversionCharge,
        Self::SalaryCharge,
        Self::InternalTransferCharge,
        Self::DividendCharge,
        Self::BusinessTripCharge,
        Self::MonthlyVatCharge,
        Self::BankDepositCharge,
        Self::CreditcardBankCharge,
        Self::FinancialCharge,
    ];

    /// Archetype name as stored and logged.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommonCharge => "CommonCharge",
            Self::ConversionCharge => "ConversionCharge",
            Self::SalaryCharge => "SalaryCharge",
            Self::InternalTransferCharge => "InternalTransferCharge",
            Self::DividendCharge => "DividendCharge",
            Self::BusinessTripCharge => "BusinessTripCharge",
            Self::MonthlyVatCharge => "MonthlyVatCharge",
            Self::BankDepositCharge => "BankDepositCharge",
            Self::CreditcardBankCharge => "CreditcardBankCharge",
            Self::FinancialCharge => "FinancialCharge",
        }
    }
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChargeType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GenerationError::UnsupportedChargeType(s.to_string()))
    }
}
