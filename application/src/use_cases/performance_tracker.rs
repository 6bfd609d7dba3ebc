//! Durable per-(task, provider) performance history
//!
//! The table is loaded once from the [`StateStore`] and rewritten in full
//! after every update. A single mutex is held across the
//! read-modify-write-persist cycle, so concurrent updates to the same key
//! are serialized and never lost.

use crate::ports::state_store::{PERFORMANCE_METRICS_KEY, StateStore};
use insight_domain::{
    ExecutionOutcome, Observation, PerformanceRecord, PerformanceTable, ProviderId,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub struct PerformanceTracker {
    table: Mutex<PerformanceTable>,
    store: Arc<dyn StateStore>,
}

impl PerformanceTracker {
    /// Load history from the store.
    ///
    /// Missing, unreadable or corrupt data starts an empty table; startup
    /// never fails because of it.
    pub fn load(store: Arc<dyn StateStore>) -> Self {
        let table = match store.load(PERFORMANCE_METRICS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<PerformanceRecord>>(&json) {
                Ok(records) => {
                    debug!("Loaded {} performance records", records.len());
                    PerformanceTable::from_records(records)
                }
                Err(e) => {
                    warn!("Corrupt performance metrics, starting empty: {}", e);
                    PerformanceTable::new()
                }
            },
            Ok(None) => PerformanceTable::new(),
            Err(e) => {
                warn!("Could not read performance metrics, starting empty: {}", e);
                PerformanceTable::new()
            }
        };

        Self {
            table: Mutex::new(table),
            store,
        }
    }

    /// Fold one observation into the record for `(task_id, provider_id)`
    /// and persist the table.
    pub fn record(
        &self,
        task_id: &str,
        provider_id: ProviderId,
        observation: &Observation,
    ) -> PerformanceRecord {
        let mut table = self.lock();
        let updated = table.observe(task_id, provider_id, observation).clone();
        debug!(
            "Performance {}/{}: success_rate={:.3} confidence={:.3} samples={}",
            task_id, provider_id, updated.success_rate, updated.avg_confidence, updated.samples
        );
        self.persist(&table);
        updated
    }

    /// Record what an execution outcome observed.
    pub fn record_outcome(&self, task_id: &str, outcome: &ExecutionOutcome) -> PerformanceRecord {
        self.record(task_id, outcome.provider_id, &outcome.observation())
    }

    /// Blend explicit user satisfaction into an existing record.
    ///
    /// Returns `None`, leaving the table untouched, when the key has never
    /// been executed.
    pub fn record_feedback(
        &self,
        task_id: &str,
        provider_id: ProviderId,
        satisfaction: f64,
    ) -> Option<PerformanceRecord> {
        let mut table = self.lock();
        let Some(updated) = table
            .observe_satisfaction(task_id, provider_id, satisfaction)
            .cloned()
        else {
            warn!(
                "Ignoring feedback for {}/{}: no performance record yet",
                task_id, provider_id
            );
            return None;
        };
        self.persist(&table);
        Some(updated)
    }

    /// Current record for one key.
    pub fn get(&self, task_id: &str, provider_id: ProviderId) -> Option<PerformanceRecord> {
        self.lock().get(task_id, provider_id).cloned()
    }

    /// Copy of the whole table, for routing decisions.
    pub fn snapshot(&self) -> PerformanceTable {
        self.lock().clone()
    }

    /// All records, ordered by task id then provider.
    pub fn records(&self) -> Vec<PerformanceRecord> {
        self.lock().records()
    }

    fn lock(&self) -> MutexGuard<'_, PerformanceTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, table: &PerformanceTable) {
        let json = match serde_json::to_string(&table.records()) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize performance metrics: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(PERFORMANCE_METRICS_KEY, &json) {
            warn!("Could not persist performance metrics: {}", e);
        }
    }
}
