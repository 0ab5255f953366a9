//! Ledger generation.
//!
//! One generator per charge archetype, selected by `generator_for`. Generators turn a
//! charge snapshot into record drafts, which are converted into ledger records and
//! validated by `generate_for_snapshot`.

pub mod bank_deposit;
pub mod business_trip;
pub mod common;
pub mod conversion;
pub mod dispatcher;
pub mod dividend;
pub mod documents;
pub mod draft;
pub mod fees;
pub mod payments;
pub mod transactions;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use dispatcher::{generate_for_snapshot, generator_for};
pub use draft::{Leg, RecordDraft};
pub use types::{ChargeFailure, ChargeLedger, GenerationInput, GeneratorFn, GeneratorOutput};
