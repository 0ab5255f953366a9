//! Admin context error types.

use ledgerline_shared::types::BusinessId;
use thiserror::Error;

/// Errors raised while building an `AdminContext` from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// A business appears in both the supplemental and fundamental fee allowlists.
    #[error(
        "Fee allowlists overlap on {} business(es), first: {}",
        .business_ids.len(),
        .business_ids[0]
    )]
    OverlappingFeeAllowlists {
        /// Businesses present in both allowlists (never empty).
        business_ids: Vec<BusinessId>,
    },
}

impl ContextError {
    /// Returns the error code for logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::OverlappingFeeAllowlists { .. } => "OVERLAPPING_FEE_ALLOWLISTS",
        }
    }
}
