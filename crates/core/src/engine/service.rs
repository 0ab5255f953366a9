//! Ledger engine: regenerates and stores the ledger records of charges.

use std::sync::Arc;

use ledgerline_shared::types::ChargeId;
use ledgerline_shared::{AppError, AppResult, EngineConfig, PartialPolicy};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{error, info, warn};

use super::locks::ChargeLocks;
use super::report::BatchReport;
use super::repository::{AdminContextLoader, ChargeLoader, LedgerSink};
use crate::classify::ChargeType;
use crate::currency::{CachedRates, ExchangeRates};
use crate::error::{ErrorKind, GenerationError};
use crate::generation::{ChargeFailure, ChargeLedger, generate_for_snapshot};

/// Ledger engine over its collaborators.
///
/// Regenerations of the same charge are serialized; different charges run in parallel on
/// a bounded worker pool.
pub struct LedgerEngine<L, C, S, R> {
    charges: Arc<L>,
    contexts: Arc<C>,
    sink: Arc<S>,
    rates: CachedRates<R>,
    locks: ChargeLocks,
    pool: ThreadPool,
    partial_policy: PartialPolicy,
}

impl<L, C, S, R> LedgerEngine<L, C, S, R>
where
    L: ChargeLoader,
    C: AdminContextLoader,
    S: LedgerSink,
    R: ExchangeRates,
{
    /// Creates an engine, wrapping `rates` in a cache sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the worker pool cannot be started.
    pub fn new(
        config: &EngineConfig,
        charges: Arc<L>,
        contexts: Arc<C>,
        sink: Arc<S>,
        rates: R,
    ) -> AppResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.max(1))
            .thread_name(|i| format!("ledger-worker-{i}"))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to start worker pool: {e}")))?;

        Ok(Self {
            charges,
            contexts,
            sink,
            rates: CachedRates::with_config(
                rates,
                config.rate_cache_capacity,
                config.rate_cache_ttl_secs,
            ),
            locks: ChargeLocks::new(),
            pool,
            partial_policy: config.partial_policy,
        })
    }

    /// Regenerates the ledger records of one charge and replaces the stored set.
    ///
    /// On failure the stored records of the charge are left untouched.
    ///
    /// # Errors
    ///
    /// Returns a `ChargeFailure` if loading, generation, validation or storing fails, or
    /// if the charge is partial and the partial policy is `Reject`.
    pub fn generate_ledger_for_charge(
        &self,
        charge_id: ChargeId,
    ) -> Result<ChargeLedger, ChargeFailure> {
        let result = self
            .locks
            .with_lock(charge_id, || self.regenerate_locked(charge_id));

        match &result {
            Ok(ledger) => info!(
                charge_id = %charge_id,
                charge_type = %ledger.charge_type,
                records = ledger.records.len(),
                skipped = ledger.errors.len(),
                "Regenerated ledger records"
            ),
            Err(failure) => log_failure(failure),
        }

        result
    }

    /// Regenerates every charge in `charge_ids` on the worker pool.
    ///
    /// One failing charge never stops the others. The report keeps input order.
    pub fn regenerate_all(&self, charge_ids: &[ChargeId]) -> BatchReport {
        let results: Vec<_> = self.pool.install(|| {
            charge_ids
                .par_iter()
                .map(|&charge_id| self.generate_ledger_for_charge(charge_id))
                .collect()
        });

        let report = BatchReport::from_results(results);
        info!(
            total = report.total(),
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            records = report.record_count(),
            "Batch regeneration finished"
        );
        report
    }

    fn regenerate_locked(&self, charge_id: ChargeId) -> Result<ChargeLedger, ChargeFailure> {
        let loader_failure = |source: AppError| {
            ChargeFailure::single(charge_id, None, GenerationError::Loader { charge_id, source })
        };

        let snapshot = self
            .charges
            .load_charge(charge_id)
            .map_err(loader_failure)?
            .normalized();
        let context = self
            .contexts
            .load_admin_context(snapshot.charge.owner_id)
            .map_err(loader_failure)?;

        let ledger = generate_for_snapshot(&snapshot, &context, &self.rates)?;

        if ledger.is_partial() && self.partial_policy == PartialPolicy::Reject {
            return Err(ChargeFailure {
                charge_id,
                charge_type: Some(ledger.charge_type),
                errors: ledger.errors,
            });
        }

        self.sink
            .replace_charge_records(charge_id, &ledger.records)
            .map_err(|source| {
                ChargeFailure::single(
                    charge_id,
                    Some(ledger.charge_type),
                    GenerationError::Persistence { charge_id, source },
                )
            })?;

        Ok(ledger)
    }
}

fn log_failure(failure: &ChargeFailure) {
    let charge_type = failure.charge_type.map_or("unclassified", ChargeType::as_str);
    let Some(first) = failure.errors.first() else {
        return;
    };

    if first.kind() == ErrorKind::Persistence {
        error!(
            charge_id = %failure.charge_id,
            charge_type,
            error_code = failure.error_code(),
            error = %first,
            "Failed to store ledger records"
        );
    } else {
        warn!(
            charge_id = %failure.charge_id,
            charge_type,
            error_code = failure.error_code(),
            errors = failure.errors.len(),
            error = %first,
            "Skipped charge"
        );
    }
}
