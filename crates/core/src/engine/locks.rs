//! Per-charge mutual exclusion for regeneration.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use ledgerline_shared::types::ChargeId;

/// One lock per charge currently being regenerated.
///
/// Entries are created on demand and dropped once no caller holds or waits for them,
/// so the map only ever holds charges that are in flight.
#[derive(Debug, Default)]
pub struct ChargeLocks {
    locks: DashMap<ChargeId, Arc<Mutex<()>>>,
}

impl ChargeLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock of `charge_id`.
    ///
    /// Calls for different charges never block each other.
    pub fn with_lock<T>(&self, charge_id: ChargeId, f: impl FnOnce() -> T) -> T {
        // The shard guard of `entry` must be released before waiting on the mutex.
        let lock = Arc::clone(self.locks.entry(charge_id).or_default().value());

        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        drop(lock);
        self.locks
            .remove_if(&charge_id, |_, lock| Arc::strong_count(lock) == 1);
        result
    }

    /// Number of charges with a live lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns true if no charge is locked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
