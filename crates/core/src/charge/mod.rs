//! Charge aggregate: transactions, documents and business trips grouped into one event.

pub mod types;

pub use types::{
    BusinessTrip, Charge, ChargeKind, ChargeSnapshot, Document, DocumentType, Transaction,
    TripAllocation, TripExpenseCategory,
};
