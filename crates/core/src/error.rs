//! Ledger generation errors.
//!
//! Every variant embeds the charge, transaction or document it was raised for, so a
//! batch run can log and skip the offending charge and continue with the rest.

use chrono::NaiveDate;
use ledgerline_shared::AppError;
use ledgerline_shared::types::{BusinessId, ChargeId, Currency, DocumentId, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::context::ContextError;
use crate::ledger::LedgerValidationError;

/// Broad category of a generation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Required admin configuration is missing or invalid.
    Configuration,
    /// The charge's transactions do not fit its archetype.
    ClassificationAmbiguity,
    /// A fee transaction cannot be categorized.
    FeeClassification,
    /// Transactions or documents lack data the generator needs.
    IncompleteData,
    /// A generated record violates a structural ledger rule.
    Validation,
    /// No generator exists for the archetype.
    UnsupportedChargeType,
    /// Reference data (exchange rates, charge data) could not be read.
    ReferenceData,
    /// Accepted records could not be persisted.
    Persistence,
    /// The generator produced something it cannot represent.
    Internal,
}

/// Errors raised while generating the ledger of a charge.
#[derive(Debug, Error)]
pub enum GenerationError {
    // ========== Configuration Errors ==========
    /// A required admin configuration field is not set.
    #[error("Charge {charge_id}: missing configuration `{field}`")]
    MissingConfiguration {
        /// Charge being generated.
        charge_id: ChargeId,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Admin configuration is invalid.
    #[error(transparent)]
    InvalidConfiguration(#[from] ContextError),

    // ========== Classification Ambiguity ==========
    /// A conversion charge has more than one incoming leg.
    #[error("Conversion charge {charge_id} has multiple destination currencies")]
    MultipleDestinationCurrencies {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    /// A conversion charge has more than one outgoing leg.
    #[error("Conversion charge {charge_id} has multiple source currencies")]
    MultipleSourceCurrencies {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    /// A conversion charge has no outgoing leg.
    #[error("Conversion charge {charge_id} has no source transaction")]
    MissingConversionSource {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    /// A conversion charge has no incoming leg.
    #[error("Conversion charge {charge_id} has no destination transaction")]
    MissingConversionDestination {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    /// Both conversion legs are in the same currency.
    #[error("Conversion charge {charge_id} converts {currency} into itself")]
    SingleCurrencyConversion {
        /// Charge being generated.
        charge_id: ChargeId,
        /// The single currency.
        currency: Currency,
    },

    /// The charge points at a business trip that was not loaded.
    #[error("Charge {charge_id} is linked to a business trip that could not be found")]
    MissingBusinessTrip {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    /// A trip transaction is in none of the trip's expense categories.
    #[error("Transaction {transaction_id} is not allocated to any trip expense category")]
    UnallocatedTripTransaction {
        /// Offending transaction.
        transaction_id: TransactionId,
    },

    /// A trip transaction is in more than one expense category.
    #[error("Transaction {transaction_id} is allocated to more than one trip expense category")]
    AmbiguousTripTransaction {
        /// Offending transaction.
        transaction_id: TransactionId,
    },

    /// Transaction does not belong to a dividend charge.
    #[error("{transaction_id} is not a dividend transaction")]
    NotDividendTransaction {
        /// Offending transaction.
        transaction_id: TransactionId,
    },

    // ========== Fee Classification ==========
    /// Fee counterparty is in neither fee allowlist.
    #[error("Fee transaction {transaction_id} has unclassified business {business_id}")]
    UnclassifiedFeeBusiness {
        /// Offending transaction.
        transaction_id: TransactionId,
        /// Its counterparty.
        business_id: BusinessId,
    },

    /// Transaction has no counterparty.
    #[error("Transaction {transaction_id} has no business")]
    MissingBusinessId {
        /// Offending transaction.
        transaction_id: TransactionId,
    },

    /// A supplemental fee has no main record in its currency to fold into.
    #[error("Supplemental fee {transaction_id} has no main transaction to attach to")]
    UnattachedSupplementalFee {
        /// Offending fee transaction.
        transaction_id: TransactionId,
    },

    // ========== Incomplete Data ==========
    /// An accountable document lacks a field.
    #[error("Document {document_id} is missing `{field}`")]
    IncompleteDocument {
        /// Offending document.
        document_id: DocumentId,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The charge has documents but no accrual tax category.
    #[error("Charge {charge_id} has no tax category")]
    MissingTaxCategory {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    // ========== Reference Data ==========
    /// No exchange rate for a date.
    #[error("No exchange rate from {currency} to {local} on {date}")]
    MissingExchangeRate {
        /// Foreign currency.
        currency: Currency,
        /// Default local currency.
        local: Currency,
        /// Rate date.
        date: NaiveDate,
    },

    /// Charge data could not be loaded.
    #[error("Failed to load charge {charge_id}: {source}")]
    Loader {
        /// Charge being generated.
        charge_id: ChargeId,
        /// Collaborator error.
        #[source]
        source: AppError,
    },

    // ========== Validation ==========
    /// A generated record failed validation.
    #[error("Charge {charge_id}: ledger record #{record_index} is invalid: {source}")]
    Validation {
        /// Charge being generated.
        charge_id: ChargeId,
        /// Index of the record in the generated set.
        record_index: usize,
        /// The violated rule.
        #[source]
        source: LedgerValidationError,
    },

    /// A record would need more than two entities on one side.
    #[error("Charge {charge_id}: ledger record needs more than two entities on one side")]
    RecordOverflow {
        /// Charge being generated.
        charge_id: ChargeId,
    },

    /// A record's local debit and credit totals differ.
    #[error(
        "Charge {charge_id}: ledger record #{record_index} is unbalanced \
         (debit {debit}, credit {credit})"
    )]
    UnbalancedRecord {
        /// Charge being generated.
        charge_id: ChargeId,
        /// Index of the record in the generated set.
        record_index: usize,
        /// Local debit total.
        debit: Decimal,
        /// Local credit total.
        credit: Decimal,
    },

    // ========== Dispatch ==========
    /// Archetype name without a generator.
    #[error("Unsupported charge type: {0}")]
    UnsupportedChargeType(String),

    // ========== Persistence ==========
    /// Accepted records could not be written.
    #[error("Failed to persist ledger of charge {charge_id}: {source}")]
    Persistence {
        /// Charge being generated.
        charge_id: ChargeId,
        /// Collaborator error.
        #[source]
        source: AppError,
    },
}

impl GenerationError {
    /// Returns the broad category of the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfiguration { .. } | Self::InvalidConfiguration(_) => {
                ErrorKind::Configuration
            }
            Self::MultipleDestinationCurrencies { .. }
            | Self::MultipleSourceCurrencies { .. }
            | Self::MissingConversionSource { .. }
            | Self::MissingConversionDestination { .. }
            | Self::SingleCurrencyConversion { .. }
            | Self::MissingBusinessTrip { .. }
            | Self::UnallocatedTripTransaction { .. }
            | Self::AmbiguousTripTransaction { .. }
            | Self::NotDividendTransaction { .. } => ErrorKind::ClassificationAmbiguity,
            Self::UnclassifiedFeeBusiness { .. }
            | Self::MissingBusinessId { .. }
            | Self::UnattachedSupplementalFee { .. } => ErrorKind::FeeClassification,
            Self::IncompleteDocument { .. } | Self::MissingTaxCategory { .. } => {
                ErrorKind::IncompleteData
            }
            Self::MissingExchangeRate { .. } | Self::Loader { .. } => ErrorKind::ReferenceData,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::RecordOverflow { .. } | Self::UnbalancedRecord { .. } => ErrorKind::Internal,
            Self::UnsupportedChargeType(_) => ErrorKind::UnsupportedChargeType,
            Self::Persistence { .. } => ErrorKind::Persistence,
        }
    }

    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingConfiguration { .. } => "MISSING_CONFIGURATION",
            Self::InvalidConfiguration(e) => e.error_code(),
            Self::MultipleDestinationCurrencies { .. } => "MULTIPLE_DESTINATION_CURRENCIES",
            Self::MultipleSourceCurrencies { .. } => "MULTIPLE_SOURCE_CURRENCIES",
            Self::MissingConversionSource { .. } => "MISSING_CONVERSION_SOURCE",
            Self::MissingConversionDestination { .. } => "MISSING_CONVERSION_DESTINATION",
            Self::SingleCurrencyConversion { .. } => "SINGLE_CURRENCY_CONVERSION",
            Self::MissingBusinessTrip { .. } => "MISSING_BUSINESS_TRIP",
            Self::UnallocatedTripTransaction { .. } => "UNALLOCATED_TRIP_TRANSACTION",
            Self::AmbiguousTripTransaction { .. } => "AMBIGUOUS_TRIP_TRANSACTION",
            Self::NotDividendTransaction { .. } => "NOT_DIVIDEND_TRANSACTION",
            Self::UnclassifiedFeeBusiness { .. } => "UNCLASSIFIED_FEE_BUSINESS",
            Self::MissingBusinessId { .. } => "MISSING_BUSINESS_ID",
            Self::UnattachedSupplementalFee { .. } => "UNATTACHED_SUPPLEMENTAL_FEE",
            Self::IncompleteDocument { .. } => "INCOMPLETE_DOCUMENT",
            Self::MissingTaxCategory { .. } => "MISSING_TAX_CATEGORY",
            Self::MissingExchangeRate { .. } => "MISSING_EXCHANGE_RATE",
            Self::Loader { .. } => "LOADER_ERROR",
            Self::Validation { source, .. } => source.error_code(),
            Self::RecordOverflow { .. } => "RECORD_OVERFLOW",
            Self::UnbalancedRecord { .. } => "UNBALANCED_RECORD",
            Self::UnsupportedChargeType(_) => "UNSUPPORTED_CHARGE_TYPE",
            Self::Persistence { .. } => "PERSISTENCE_ERROR",
        }
    }

    /// Returns true if retrying with the same inputs may succeed.
    ///
    /// Generation is deterministic, so only collaborator failures qualify.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Loader { source, .. } | Self::Persistence { source, .. } => {
                source.is_retryable()
            }
            _ => false,
        }
    }
}
