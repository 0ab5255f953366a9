//! Core business logic for Ledgerline.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It classifies charges into archetypes and generates their double-entry ledger records.
//!
//! # Modules
//!
//! - `charge` - Charges, transactions, documents and business trips
//! - `context` - Admin context (validated bookkeeping configuration)
//! - `split` - Fee and interest splitters
//! - `classify` - Charge type classification rules
//! - `ledger` - Ledger records and their structural validation
//! - `currency` - Exchange rates, conversion and rate caching
//! - `generation` - Per-archetype ledger generators and the dispatcher
//! - `engine` - Collaborator traits, per-charge locking and batch regeneration

pub mod charge;
pub mod classify;
pub mod context;
pub mod currency;
pub mod engine;
pub mod error;
pub mod generation;
pub mod ledger;
pub mod split;

pub use classify::{ChargeType, classify};
pub use engine::{BatchReport, LedgerEngine};
pub use error::{ErrorKind, GenerationError};
pub use generation::{ChargeFailure, ChargeLedger, generate_for_snapshot};
