//! Batch regeneration report.

use ledgerline_shared::types::ChargeId;

pub use crate::generation::{ChargeFailure, ChargeLedger};

/// Outcome of regenerating a batch of charges.
///
/// Both lists keep the order the charges were requested in.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Charges whose records were stored.
    pub succeeded: Vec<ChargeLedger>,
    /// Charges that failed, with their errors.
    pub failed: Vec<ChargeFailure>,
}

impl BatchReport {
    /// Splits per-charge results, preserving their order.
    #[must_use]
    pub fn from_results(results: Vec<Result<ChargeLedger, ChargeFailure>>) -> Self {
        let mut report = Self::default();
        for result in results {
            match result {
                Ok(ledger) => report.succeeded.push(ledger),
                Err(failure) => report.failed.push(failure),
            }
        }
        report
    }

    /// Number of charges processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Total number of records stored.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.succeeded.iter().map(|l| l.records.len()).sum()
    }

    /// Charges stored with skipped transactions.
    pub fn partial(&self) -> impl Iterator<Item = &ChargeLedger> {
        self.succeeded.iter().filter(|l| l.is_partial())
    }

    /// Failed charges worth retrying.
    #[must_use]
    pub fn retryable(&self) -> Vec<ChargeId> {
        self.failed
            .iter()
            .filter(|f| f.is_retryable())
            .map(|f| f.charge_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ChargeType;
    use crate::error::GenerationError;
    use ledgerline_shared::AppError;

    fn ledger(charge_id: ChargeId) -> ChargeLedger {
        ChargeLedger {
            charge_id,
            charge_type: ChargeType::CommonCharge,
            records: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_from_results_keeps_order() {
        let ids: Vec<_> = (0..4).map(|_| ChargeId::new()).collect();
        let results = vec![
            Ok(ledger(ids[0])),
            Err(ChargeFailure::single(
                ids[1],
                None,
                GenerationError::Loader {
                    charge_id: ids[1],
                    source: AppError::ExternalService("timeout".into()),
                },
            )),
            Ok(ledger(ids[2])),
            Err(ChargeFailure::single(
                ids[3],
                Some(ChargeType::ConversionCharge),
                GenerationError::MissingConversionSource { charge_id: ids[3] },
            )),
        ];

        let report = BatchReport::from_results(results);
        assert_eq!(report.total(), 4);
        assert_eq!(
            report.succeeded.iter().map(|l| l.charge_id).collect::<Vec<_>>(),
            vec![ids[0], ids[2]]
        );
        assert_eq!(
            report.failed.iter().map(|f| f.charge_id).collect::<Vec<_>>(),
            vec![ids[1], ids[3]]
        );
        assert_eq!(report.retryable(), vec![ids[1]]);
        assert_eq!(report.record_count(), 0);
        assert_eq!(report.partial().count(), 0);
    }
}
