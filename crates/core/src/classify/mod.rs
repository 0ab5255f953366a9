//! Charge type classification.
//!
//! An ordered list of predicate rules mapping a charge and its admin context to exactly
//! one archetype. The first matching rule wins.

pub mod rules;
pub mod types;

#[cfg(test)]
mod rules_props;

pub use rules::{ClassificationRule, RULES, classify, matching_rule};
pub use types::ChargeType;
