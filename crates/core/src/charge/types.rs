//! Charge domain types: the charge aggregate, its transactions, documents and business trip.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use ledgerline_shared::types::{
    BusinessId, BusinessTripId, ChargeId, Currency, DocumentId, FinancialEntityId, Money, OwnerId,
    TransactionId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Intrinsic type hint recorded on a charge when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeKind {
    /// Currency conversion between two of the owner's accounts.
    Conversion,
    /// Salary and payroll payments.
    Payroll,
    /// Financial adjustments (revaluation, depreciation, closing entries).
    Financial,
}

/// A grouped accounting event: one real-world financial event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    /// Charge ID.
    pub id: ChargeId,
    /// The organization owning this charge.
    pub owner_id: OwnerId,
    /// Intrinsic type hint, if any.
    #[serde(default)]
    pub kind: Option<ChargeKind>,
    /// Business trip this charge belongs to.
    #[serde(default)]
    pub business_trip_id: Option<BusinessTripId>,
    /// Primary counterparty.
    #[serde(default)]
    pub business_id: Option<BusinessId>,
    /// Every counterparty touched by the charge's transactions.
    #[serde(default)]
    pub business_array: BTreeSet<BusinessId>,
    /// Accrual tax category used for document records.
    #[serde(default)]
    pub tax_category_id: Option<FinancialEntityId>,
    /// Free-text description entered by the user.
    #[serde(default)]
    pub user_description: Option<String>,
}

impl Charge {
    /// Creates an untyped charge with no counterparties.
    #[must_use]
    pub fn new(id: ChargeId, owner_id: OwnerId) -> Self {
        Self {
            id,
            owner_id,
            kind: None,
            business_trip_id: None,
            business_id: None,
            business_array: BTreeSet::new(),
            tax_category_id: None,
            user_description: None,
        }
    }

    /// Sets the intrinsic type hint.
    #[must_use]
    pub fn with_kind(mut self, kind: ChargeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the primary counterparty.
    #[must_use]
    pub fn with_business(mut self, business_id: BusinessId) -> Self {
        self.business_id = Some(business_id);
        self
    }

    /// Links the charge to a business trip.
    #[must_use]
    pub fn with_business_trip(mut self, trip_id: BusinessTripId) -> Self {
        self.business_trip_id = Some(trip_id);
        self
    }

    /// Sets the accrual tax category.
    #[must_use]
    pub fn with_tax_category(mut self, tax_category_id: FinancialEntityId) -> Self {
        self.tax_category_id = Some(tax_category_id);
        self
    }

    /// Replaces the business array. Prefer `ChargeSnapshot::new`, which derives it.
    #[must_use]
    pub fn with_business_array(mut self, ids: impl IntoIterator<Item = BusinessId>) -> Self {
        self.business_array = ids.into_iter().collect();
        self
    }

    /// Derives the business array from a set of transactions.
    #[must_use]
    pub fn derive_business_array(transactions: &[Transaction]) -> BTreeSet<BusinessId> {
        transactions.iter().filter_map(|t| t.business_id).collect()
    }

    /// Returns true if the business is the primary counterparty or in the business array.
    #[must_use]
    pub fn touches(&self, business_id: BusinessId) -> bool {
        self.business_id == Some(business_id) || self.business_array.contains(&business_id)
    }
}

/// One money movement on an account of the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Charge the transaction belongs to.
    pub charge_id: ChargeId,
    /// Ledger entity of the owner's account the money moved on.
    pub account_entity_id: FinancialEntityId,
    /// Counterparty.
    #[serde(default)]
    pub business_id: Option<BusinessId>,
    /// Signed amount: positive is inflow, negative is outflow.
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
    /// Whether this is a fee transaction.
    #[serde(default)]
    pub is_fee: bool,
    /// Date of the event.
    pub event_date: NaiveDate,
    /// Date the account was debited.
    #[serde(default)]
    pub debit_date: Option<NaiveDate>,
    /// Exact debit time, when the source provides one.
    #[serde(default)]
    pub debit_timestamp: Option<DateTime<Utc>>,
    /// Bank description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Creates a non-fee transaction debited on its event date.
    #[must_use]
    pub fn new(
        charge_id: ChargeId,
        account_entity_id: FinancialEntityId,
        business_id: Option<BusinessId>,
        amount: Decimal,
        currency: Currency,
        event_date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            charge_id,
            account_entity_id,
            business_id,
            amount,
            currency,
            is_fee: false,
            event_date,
            debit_date: Some(event_date),
            debit_timestamp: None,
            description: None,
        }
    }

    /// Marks the transaction as a fee.
    #[must_use]
    pub fn as_fee(mut self) -> Self {
        self.is_fee = true;
        self
    }

    /// Sets the debit date.
    #[must_use]
    pub fn with_debit_date(mut self, debit_date: Option<NaiveDate>) -> Self {
        self.debit_date = debit_date;
        self
    }

    /// Sets the bank description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Amount and currency together.
    #[must_use]
    pub const fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }

    /// Date the transaction is valued at: debit date, else the debit timestamp's date.
    #[must_use]
    pub fn value_date(&self) -> Option<NaiveDate> {
        self.debit_date
            .or_else(|| self.debit_timestamp.map(|t| t.date_naive()))
    }

    /// Date used for exchange-rate lookup.
    #[must_use]
    pub fn rate_date(&self) -> NaiveDate {
        self.value_date().unwrap_or(self.event_date)
    }
}

/// Source document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Tax invoice.
    Invoice,
    /// Payment receipt.
    Receipt,
    /// Combined invoice and receipt.
    InvoiceReceipt,
    /// Credit note reversing an invoice.
    CreditInvoice,
    /// Proforma (no tax meaning).
    Proforma,
    /// Not yet processed.
    Unprocessed,
    /// Anything else.
    Other,
}

impl DocumentType {
    /// Returns true for documents that create accrual records.
    #[must_use]
    pub const fn is_accountable(self) -> bool {
        matches!(
            self,
            Self::Invoice | Self::InvoiceReceipt | Self::CreditInvoice
        )
    }
}

/// An invoice, receipt or other source document linked to a charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: DocumentId,
    /// Charge the document belongs to.
    pub charge_id: ChargeId,
    /// Document type.
    pub document_type: DocumentType,
    /// Serial number printed on the document.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Document date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Total amount including VAT.
    #[serde(default)]
    pub amount: Option<Money>,
    /// VAT part of the total.
    #[serde(default)]
    pub vat_amount: Option<Decimal>,
    /// Issuer of the document.
    #[serde(default)]
    pub creditor_id: Option<FinancialEntityId>,
    /// Recipient of the document.
    #[serde(default)]
    pub debtor_id: Option<FinancialEntityId>,
}

/// Business trip expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripExpenseCategory {
    /// Hotels and lodging.
    Accommodation,
    /// Flights.
    Flight,
    /// Local travel.
    Travel,
    /// Car rental.
    CarRental,
    /// Other expenses.
    Other,
}

impl TripExpenseCategory {
    /// Category name as shown in record descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Flight => "flight",
            Self::Travel => "travel",
            Self::CarRental => "car rental",
            Self::Other => "other",
        }
    }
}

/// Transactions allocated to one of a trip's expense categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripAllocation {
    /// Expense category.
    pub category: TripExpenseCategory,
    /// Tax category the expense posts to.
    pub tax_category_id: FinancialEntityId,
    /// Transactions allocated to this category.
    pub transaction_ids: Vec<TransactionId>,
}

/// A business trip with its declared expense allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessTrip {
    /// Trip ID.
    pub id: BusinessTripId,
    /// Trip name.
    pub name: String,
    /// Expense allocations.
    #[serde(default)]
    pub allocations: Vec<TripAllocation>,
}

impl BusinessTrip {
    /// Allocations the transaction is listed in.
    pub fn allocations_of(
        &self,
        transaction_id: TransactionId,
    ) -> impl Iterator<Item = &TripAllocation> {
        self.allocations
            .iter()
            .filter(move |a| a.transaction_ids.contains(&transaction_id))
    }
}

/// A charge with everything linked to it, as loaded for ledger generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeSnapshot {
    /// The charge.
    pub charge: Charge,
    /// Linked transactions.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Linked documents.
    #[serde(default)]
    pub documents: Vec<Document>,
    /// The business trip, when the charge is linked to one.
    #[serde(default)]
    pub business_trip: Option<BusinessTrip>,
}

impl ChargeSnapshot {
    /// Creates a snapshot, deriving the charge's business array from its transactions.
    #[must_use]
    pub fn new(
        charge: Charge,
        transactions: Vec<Transaction>,
        documents: Vec<Document>,
        business_trip: Option<BusinessTrip>,
    ) -> Self {
        Self {
            charge,
            transactions,
            documents,
            business_trip,
        }
        .normalized()
    }

    /// Re-derives the business array. Loaders deserializing snapshots should call this.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.charge.business_array = Charge::derive_business_array(&self.transactions);
        self
    }

    /// Returns true if the business array matches the linked transactions.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.charge.business_array == Charge::derive_business_array(&self.transactions)
    }
}
