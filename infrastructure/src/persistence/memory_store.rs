//! In-memory state store for `--ephemeral` runs and tests.

use insight_application::ports::state_store::{StateStore, StoreError};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryStateStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StoreError> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(key.to_string(), json.to_string());
        Ok(())
    }
}
