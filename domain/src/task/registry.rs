//! Static task catalogue

use super::definition::{Complexity, TaskDefinition};
use crate::core::error::DomainError;
use crate::core::provider::ProviderId;
use std::collections::HashMap;

/// Read-only catalogue of task definitions, built once at startup.
#[derive(Debug, Clone)]
pub struct TaskRegistry {
    tasks: Vec<TaskDefinition>,
    index: HashMap<String, usize>,
}

impl TaskRegistry {
    /// Build a registry, rejecting duplicate ids and non-positive
    /// cost-efficiency factors.
    pub fn new(tasks: Vec<TaskDefinition>) -> Result<Self, DomainError> {
        let mut index = HashMap::with_capacity(tasks.len());

        for (i, task) in tasks.iter().enumerate() {
            let factor = task.cost_efficiency_factor;
            if !factor.is_finite() || factor <= 0.0 {
                return Err(DomainError::InvalidCostEfficiency {
                    task_id: task.id.clone(),
                    factor,
                });
            }
            if index.insert(task.id.clone(), i).is_some() {
                return Err(DomainError::DuplicateTask(task.id.clone()));
            }
        }

        Ok(Self { tasks, index })
    }

    /// The built-in catalogue.
    pub fn with_defaults() -> Self {
        let tasks = vec![
            TaskDefinition::pinned("quick-insights", Complexity::Simple, ProviderId::Fast)
                .with_cost_efficiency(1.2)
                .with_description("Short takeaways from a small dataset"),
            TaskDefinition::pinned("market-analysis", Complexity::Complex, ProviderId::Quality)
                .with_fallback(ProviderId::Fast)
                .with_description("Structured market analysis with recommendations"),
            TaskDefinition::auto("trend-forecast", Complexity::Complex)
                .with_fallback(ProviderId::Fast)
                .with_cost_efficiency(0.9)
                .with_description("Forecast of metric trends with rationale"),
            TaskDefinition::auto("competitor-review", Complexity::Medium)
                .with_fallback(ProviderId::Quality)
                .with_description("Comparison against competitor positioning"),
            TaskDefinition::auto("sentiment-summary", Complexity::Medium)
                .with_fallback(ProviderId::Fast)
                .with_cost_efficiency(1.1)
                .with_description("Summary of customer sentiment signals"),
            TaskDefinition::auto("content-ideas", Complexity::Simple)
                .with_cost_efficiency(1.3)
                .with_description("Creative campaign and content ideas"),
            TaskDefinition::pinned("visual-brief", Complexity::Medium, ProviderId::Fast)
                .with_description("Brief for a generated visual asset"),
            TaskDefinition::pinned("strategic-plan", Complexity::Complex, ProviderId::Quality)
                .with_fallback(ProviderId::Fast)
                .with_cost_efficiency(0.8)
                .with_description("Multi-quarter strategic plan"),
        ];

        let index = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        Self { tasks, index }
    }

    /// Look up a task by id.
    pub fn lookup(&self, task_id: &str) -> Option<&TaskDefinition> {
        self.index.get(task_id).map(|&i| &self.tasks[i])
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.index.contains_key(task_id)
    }

    /// All definitions in catalogue order.
    pub fn definitions(&self) -> &[TaskDefinition] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let defaults = TaskRegistry::with_defaults();
        let rebuilt = TaskRegistry::new(defaults.definitions().to_vec()).unwrap();
        assert_eq!(rebuilt.len(), defaults.len());
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let registry = TaskRegistry::with_defaults();
        let task = registry.lookup("quick-insights").unwrap();
        assert_eq!(task.complexity, Complexity::Simple);
        assert_eq!(task.primary_provider.concrete(), Some(ProviderId::Fast));
        assert!(registry.lookup("no-such-task").is_none());
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        let result = TaskRegistry::new(vec![
            TaskDefinition::auto("broken", Complexity::Simple).with_cost_efficiency(0.0),
        ]);
        assert!(matches!(
            result,
            Err(DomainError::InvalidCostEfficiency { .. })
        ));

        let result = TaskRegistry::new(vec![
            TaskDefinition::auto("nan", Complexity::Simple).with_cost_efficiency(f64::NAN),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = TaskRegistry::new(vec![
            TaskDefinition::auto("dup", Complexity::Simple),
            TaskDefinition::auto("dup", Complexity::Complex),
        ]);
        assert_eq!(result.unwrap_err(), DomainError::DuplicateTask("dup".into()));
    }

    #[test]
    fn test_definitions_keep_order() {
        let registry = TaskRegistry::new(vec![
            TaskDefinition::auto("b", Complexity::Simple),
            TaskDefinition::auto("a", Complexity::Simple),
        ])
        .unwrap();
        let ids: Vec<_> = registry.definitions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
