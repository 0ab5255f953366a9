//! Ledger engine: the single entry point for regenerating ledger records.
//!
//! - `repository` - Collaborator traits (charge loader, admin context loader, ledger sink)
//! - `locks` - Per-charge mutual exclusion
//! - `service` - `LedgerEngine` with its bounded batch worker pool
//! - `report` - Batch regeneration report
//! - `memory` - In-memory collaborators and JSON fixtures

pub mod locks;
pub mod memory;
pub mod report;
pub mod repository;
pub mod service;

pub use locks::ChargeLocks;
pub use memory::{Fixture, InMemoryLedgerStore};
pub use report::BatchReport;
pub use repository::{AdminContextLoader, ChargeLoader, LedgerSink};
pub use service::LedgerEngine;
