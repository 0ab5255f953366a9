//! Ordered classification rules.

use crate::charge::{Charge, ChargeKind};
use crate::context::AdminContext;

use super::types::ChargeType;

/// One classification rule: a predicate and the archetype it assigns.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Rule name for logs.
    pub name: &'static str,
    /// Archetype assigned when the rule matches.
    pub charge_type: ChargeType,
    /// Whether the rule looks past the intrinsic hint. Such rules never match a charge
    /// without counterparties.
    pub needs_transactions: bool,
    /// The predicate.
    pub matches: fn(&Charge, &AdminContext) -> bool,
}

fn is_conversion(charge: &Charge, _: &AdminContext) -> bool {
    charge.kind == Some(ChargeKind::Conversion)
}

fn is_payroll(charge: &Charge, _: &AdminContext) -> bool {
    charge.kind == Some(ChargeKind::Payroll)
}

fn is_financial(charge: &Charge, _: &AdminContext) -> bool {
    charge.kind == Some(ChargeKind::Financial)
}

fn is_business_trip(charge: &Charge, _: &AdminContext) -> bool {
    charge.business_trip_id.is_some()
}

fn touches_bank_deposit(charge: &Charge, context: &AdminContext) -> bool {
    context
        .bank_deposit_business_id
        .is_some_and(|id| charge.touches(id))
}

// More than one wallet: a single wallet is an ordinary charge against that wallet.
fn touches_internal_wallets(charge: &Charge, context: &AdminContext) -> bool {
    charge
        .business_array
        .iter()
        .filter(|id| context.is_internal_wallet(**id))
        .take(2)
        .count()
        > 1
}

fn touches_dividend_business(charge: &Charge, context: &AdminContext) -> bool {
    charge
        .business_array
        .iter()
        .any(|id| context.is_dividend_business(*id))
}

fn is_vat_payment(charge: &Charge, context: &AdminContext) -> bool {
    context.vat_business_id.is_some() && charge.business_id == context.vat_business_id
}

fn is_credit_card_settlement(charge: &Charge, context: &AdminContext) -> bool {
    charge.business_id.is_some_and(|id| context.is_credit_card(id))
}

/// Classification rules in precedence order. A charge matching none is a `CommonCharge`.
pub static RULES: [ClassificationRule; 9] = [
    ClassificationRule {
        name: "conversion_hint",
        charge_type: ChargeType::ConversionCharge,
        needs_transactions: false,
        matches: is_conversion,
    },
    ClassificationRule {
        name: "payroll_hint",
        charge_type: ChargeType::SalaryCharge,
        needs_transactions: false,
        matches: is_payroll,
    },
    ClassificationRule {
        name: "financial_hint",
        charge_type: ChargeType::FinancialCharge,
        needs_transactions: false,
        matches: is_financial,
    },
    ClassificationRule {
        name: "business_trip",
        charge_type: ChargeType::BusinessTripCharge,
        needs_transactions: true,
        matches: is_business_trip,
    },
    ClassificationRule {
        name: "bank_deposit",
        charge_type: ChargeType::BankDepositCharge,
        needs_transactions: true,
        matches: touches_bank_deposit,
    },
    ClassificationRule {
        name: "internal_transfer",
        charge_type: ChargeType::InternalTransferCharge,
        needs_transactions: true,
        matches: touches_internal_wallets,
    },
    ClassificationRule {
        name: "dividend",
        charge_type: ChargeType::DividendCharge,
        needs_transactions: true,
        matches: touches_dividend_business,
    },
    ClassificationRule {
        name: "monthly_vat",
        charge_type: ChargeType::MonthlyVatCharge,
        needs_transactions: true,
        matches: is_vat_payment,
    },
    ClassificationRule {
        name: "creditcard_bank",
        charge_type: ChargeType::CreditcardBankCharge,
        needs_transactions: true,
        matches: is_credit_card_settlement,
    },
];

/// Returns the first rule matching the charge, if any.
#[must_use]
pub fn matching_rule(
    charge: &Charge,
    context: &AdminContext,
) -> Option<&'static ClassificationRule> {
    let has_transactions = !charge.business_array.is_empty();
    RULES
        .iter()
        .filter(|rule| has_transactions || !rule.needs_transactions)
        .find(|rule| (rule.matches)(charge, context))
}

/// Classifies a charge. Total: falls through to `CommonCharge`.
#[must_use]
pub fn classify(charge: &Charge, context: &AdminContext) -> ChargeType {
    matching_rule(charge, context).map_or(ChargeType::CommonCharge, |rule| rule.charge_type)
}
