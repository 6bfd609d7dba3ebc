//! Mutable router configuration, durable across restarts

use crate::ports::state_store::{ROUTER_CONFIG_KEY, StateStore};
use insight_domain::{DomainError, PatchReport, RouterConfig, RouterConfigPatch, TaskRegistry};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

pub struct ConfigStore {
    config: Mutex<RouterConfig>,
    store: Arc<dyn StateStore>,
}

impl ConfigStore {
    /// Load the persisted config, falling back to `initial` when nothing is
    /// stored or the stored blob cannot be read.
    ///
    /// Override keys that no longer name a known task are dropped.
    pub fn load(
        store: Arc<dyn StateStore>,
        initial: RouterConfig,
        registry: &TaskRegistry,
    ) -> Self {
        let mut config = match store.load(ROUTER_CONFIG_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<RouterConfig>(&json) {
                Ok(config) => {
                    debug!("Loaded persisted router config");
                    config
                }
                Err(e) => {
                    warn!("Corrupt router config, using defaults: {}", e);
                    initial
                }
            },
            Ok(None) => initial,
            Err(e) => {
                warn!("Could not read router config, using defaults: {}", e);
                initial
            }
        };

        for key in config.prune_unknown_overrides(registry) {
            warn!("Ignoring override for unknown task '{}'", key);
        }

        Self {
            config: Mutex::new(config),
            store,
        }
    }

    /// Merge a partial update and persist the result when anything changed.
    pub fn configure(
        &self,
        patch: RouterConfigPatch,
        registry: &TaskRegistry,
    ) -> Result<PatchReport, DomainError> {
        let mut config = self.lock();
        let report = config.apply(patch, registry)?;

        for key in &report.ignored_overrides {
            warn!("Ignoring override for unknown task '{}'", key);
        }

        if report.changed {
            info!("Router config updated");
            self.persist(&config);
        }
        Ok(report)
    }

    /// Copy of the current config.
    pub fn get_config(&self) -> RouterConfig {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, RouterConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, config: &RouterConfig) {
        match serde_json::to_string(config) {
            Ok(json) => {
                if let Err(e) = self.store.save(ROUTER_CONFIG_KEY, &json) {
                    warn!("Could not persist router config: {}", e);
                }
            }
            Err(e) => warn!("Could not serialize router config: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MemoryStore;
    use insight_domain::ProviderId;

    fn registry() -> TaskRegistry {
        TaskRegistry::with_defaults()
    }

    #[test]
    fn test_configure_round_trip_is_idempotent() {
        let store = Arc::new(MemoryStore::default());
        let config_store = ConfigStore::load(store.clone(), RouterConfig::default(), &registry());

        let first = config_store
            .configure(RouterConfigPatch::quality_first(true), &registry())
            .unwrap();
        assert!(first.changed);
        assert!(config_store.get_config().quality_first);
        assert_eq!(store.saves(ROUTER_CONFIG_KEY), 1);

        let second = config_store
            .configure(RouterConfigPatch::quality_first(true), &registry())
            .unwrap();
        assert!(!second.changed);
        assert_eq!(store.saves(ROUTER_CONFIG_KEY), 1);
    }

    #[test]
    fn test_persisted_config_wins_over_initial() {
        let store = Arc::new(MemoryStore::default());
        {
            let config_store =
                ConfigStore::load(store.clone(), RouterConfig::default(), &registry());
            config_store
                .configure(RouterConfigPatch::cost_optimization(false), &registry())
                .unwrap();
        }

        let reloaded = ConfigStore::load(store, RouterConfig::default(), &registry());
        assert!(!reloaded.get_config().cost_optimization);
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let store = Arc::new(MemoryStore::default());
        store.insert(ROUTER_CONFIG_KEY, "[1, 2");
        let initial = RouterConfig {
            quality_first: true,
            ..RouterConfig::default()
        };
        let config_store = ConfigStore::load(store, initial.clone(), &registry());
        assert_eq!(config_store.get_config(), initial);
    }

    #[test]
    fn test_unreadable_store_falls_back() {
        let config_store = ConfigStore::load(
            Arc::new(MemoryStore::failing()),
            RouterConfig::default(),
            &registry(),
        );
        assert_eq!(config_store.get_config(), RouterConfig::default());
    }

    #[test]
    fn test_stale_overrides_are_pruned_on_load() {
        let store = Arc::new(MemoryStore::default());
        store.insert(
            ROUTER_CONFIG_KEY,
            r#"{"per_task_override": {"trend-forecast": "fast", "retired-task": "quality"}}"#,
        );
        let config = ConfigStore::load(store, RouterConfig::default(), &registry()).get_config();
        assert_eq!(config.override_for("trend-forecast"), Some(ProviderId::Fast));
        assert!(!config.per_task_override.contains_key("retired-task"));
    }

    #[test]
    fn test_invalid_patch_leaves_config_untouched() {
        let store = Arc::new(MemoryStore::default());
        let config_store = ConfigStore::load(store.clone(), RouterConfig::default(), &registry());
        let patch: RouterConfigPatch = serde_json::from_str(
            r#"{"quality_first": true, "budget_limits": {"daily": -1.0}}"#,
        )
        .unwrap();

        assert!(config_store.configure(patch, &registry()).is_err());
        assert_eq!(config_store.get_config(), RouterConfig::default());
        assert_eq!(store.saves(ROUTER_CONFIG_KEY), 0);
    }
}
