//! Fee splitting.

use crate::charge::Transaction;
use crate::context::AdminContext;
use crate::error::GenerationError;

/// How a fee transaction is booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeeKind {
    /// Folded into the main record it accompanies.
    Supplemental,
    /// Booked as a record of its own.
    Fundamental,
}

/// Transactions partitioned by their fee flag, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeSplit<'a> {
    /// Fee transactions.
    pub fee: Vec<&'a Transaction>,
    /// Everything else.
    pub main: Vec<&'a Transaction>,
}

/// Partitions transactions by their `is_fee` flag.
#[must_use]
pub fn split_fee(transactions: &[Transaction]) -> FeeSplit<'_> {
    let (fee, main): (Vec<_>, Vec<_>) = transactions.iter().partition(|t| t.is_fee);
    FeeSplit { fee, main }
}

/// Looks up a fee transaction's counterparty in the configured fee allowlists.
///
/// # Errors
///
/// - `MissingBusinessId` if the transaction has no counterparty
/// - `UnclassifiedFeeBusiness` if the counterparty is in neither allowlist
pub fn fee_kind(
    transaction: &Transaction,
    context: &AdminContext,
) -> Result<FeeKind, GenerationError> {
    let business_id = transaction
        .business_id
        .ok_or(GenerationError::MissingBusinessId {
            transaction_id: transaction.id,
        })?;

    if context.supplemental_fee_business_ids().contains(&business_id) {
        Ok(FeeKind::Supplemental)
    } else if context.fundamental_fee_business_ids().contains(&business_id) {
        Ok(FeeKind::Fundamental)
    } else {
        Err(GenerationError::UnclassifiedFeeBusiness {
            transaction_id: transaction.id,
            business_id,
        })
    }
}
