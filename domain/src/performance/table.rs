//! Keyed collection of performance records

use super::record::{Observation, PerformanceRecord};
use crate::core::provider::ProviderId;
use std::collections::BTreeMap;

/// One [`PerformanceRecord`] per `(task_id, provider_id)` pair.
///
/// Records are created lazily on first observation and never removed.
/// Iteration order is deterministic (task id, then provider).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerformanceTable {
    records: BTreeMap<(String, ProviderId), PerformanceRecord>,
}

impl PerformanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a table from persisted records. Later duplicates win.
    pub fn from_records(records: impl IntoIterator<Item = PerformanceRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| ((r.task_id.clone(), r.provider_id), r))
            .collect();
        Self { records }
    }

    pub fn get(&self, task_id: &str, provider_id: ProviderId) -> Option<&PerformanceRecord> {
        self.records.get(&(task_id.to_string(), provider_id))
    }

    /// Insert or blend an observation, returning the updated record.
    pub fn observe(
        &mut self,
        task_id: &str,
        provider_id: ProviderId,
        observation: &Observation,
    ) -> &PerformanceRecord {
        self.records
            .entry((task_id.to_string(), provider_id))
            .and_modify(|r| r.apply(observation))
            .or_insert_with(|| {
                PerformanceRecord::from_observation(task_id, provider_id, observation)
            })
    }

    /// Blend user feedback into an existing record. Returns `None` when the
    /// key has never been observed.
    pub fn observe_satisfaction(
        &mut self,
        task_id: &str,
        provider_id: ProviderId,
        satisfaction: f64,
    ) -> Option<&PerformanceRecord> {
        let record = self.records.get_mut(&(task_id.to_string(), provider_id))?;
        record.apply_satisfaction(satisfaction);
        Some(record)
    }

    /// Snapshot of all records.
    pub fn records(&self) -> Vec<PerformanceRecord> {
        self.records.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
