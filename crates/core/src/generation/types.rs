//! Generator input and output types.

use ledgerline_shared::types::{ChargeId, Currency};

use crate::charge::{Charge, ChargeSnapshot};
use crate::classify::ChargeType;
use crate::context::AdminContext;
use crate::currency::ExchangeRates;
use crate::error::GenerationError;
use crate::ledger::LedgerRecord;

/// Everything a generator reads.
#[derive(Clone, Copy)]
pub struct GenerationInput<'a> {
    /// The charge with its transactions, documents and trip.
    pub snapshot: &'a ChargeSnapshot,
    /// Admin configuration of the charge owner.
    pub context: &'a AdminContext,
    /// Exchange-rate provider.
    pub rates: &'a dyn ExchangeRates,
}

impl<'a> GenerationInput<'a> {
    /// Bundles the generator inputs.
    #[must_use]
    pub const fn new(
        snapshot: &'a ChargeSnapshot,
        context: &'a AdminContext,
        rates: &'a dyn ExchangeRates,
    ) -> Self {
        Self {
            snapshot,
            context,
            rates,
        }
    }

    /// The charge.
    #[must_use]
    pub const fn charge(&self) -> &'a Charge {
        &self.snapshot.charge
    }

    /// The charge ID.
    #[must_use]
    pub const fn charge_id(&self) -> ChargeId {
        self.snapshot.charge.id
    }

    /// The default local currency.
    #[must_use]
    pub const fn local_currency(&self) -> Currency {
        self.context.default_local_currency
    }

    /// Unwraps a configuration value the generator cannot do without.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfiguration` naming `field` if the value is not set.
    pub fn require<T: Copy>(
        &self,
        value: Option<T>,
        field: &'static str,
    ) -> Result<T, GenerationError> {
        value.ok_or(GenerationError::MissingConfiguration {
            charge_id: self.charge_id(),
            field,
        })
    }
}

/// Records produced by a generator, with the per-transaction errors it collected.
///
/// Only the dividend generator collects errors; every other generator fails as a whole.
#[derive(Debug, Default)]
pub struct GeneratorOutput {
    /// Generated records in output order.
    pub records: Vec<LedgerRecord>,
    /// Errors of transactions that produced no record.
    pub errors: Vec<GenerationError>,
}

impl GeneratorOutput {
    /// Output without errors.
    #[must_use]
    pub const fn from_records(records: Vec<LedgerRecord>) -> Self {
        Self {
            records,
            errors: Vec::new(),
        }
    }

    /// Returns true if some transactions were skipped.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A ledger generator for one archetype.
pub type GeneratorFn = fn(&GenerationInput<'_>) -> Result<GeneratorOutput, GenerationError>;

/// Validated ledger of one charge.
#[derive(Debug)]
pub struct ChargeLedger {
    /// The charge.
    pub charge_id: ChargeId,
    /// Archetype it was generated as.
    pub charge_type: ChargeType,
    /// Records, each of which passed validation.
    pub records: Vec<LedgerRecord>,
    /// Per-transaction errors of a partial generation.
    pub errors: Vec<GenerationError>,
}

impl ChargeLedger {
    /// Returns true if some transactions were skipped.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A charge whose ledger could not be generated or stored.
#[derive(Debug)]
pub struct ChargeFailure {
    /// The charge.
    pub charge_id: ChargeId,
    /// Archetype, when classification was reached.
    pub charge_type: Option<ChargeType>,
    /// Errors, never empty.
    pub errors: Vec<GenerationError>,
}

impl ChargeFailure {
    /// Failure with a single error.
    #[must_use]
    pub fn single(
        charge_id: ChargeId,
        charge_type: Option<ChargeType>,
        error: GenerationError,
    ) -> Self {
        Self {
            charge_id,
            charge_type,
            errors: vec![error],
        }
    }

    /// Error code of the first error, for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.errors
            .first()
            .map_or("UNKNOWN_ERROR", GenerationError::error_code)
    }

    /// Returns true if every error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !self.errors.is_empty() && self.errors.iter().all(GenerationError::is_retryable)
    }
}
