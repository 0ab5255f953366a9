//! Transaction splitters.
//!
//! - Fee vs main partition and supplemental/fundamental fee categorization
//! - Interest vs principal partition of bank deposit groups

pub mod fee;
pub mod interest;

#[cfg(test)]
mod props;

pub use fee::{FeeKind, FeeSplit, fee_kind, split_fee};
pub use interest::identify_interest;
