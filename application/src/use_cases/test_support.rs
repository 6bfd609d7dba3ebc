//! Test doubles shared by the use case tests.

use crate::ports::clock::Clock;
use crate::ports::event_logger::{EventLogger, RoutingEvent};
use crate::ports::provider_adapter::{ProviderAdapter, ProviderError};
use crate::ports::state_store::{StateStore, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use insight_domain::{ProviderId, ProviderReply, VisualAsset};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
    save_counts: Mutex<HashMap<String, usize>>,
    failing: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, key: &str, json: &str) {
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), json.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.lock().unwrap().get(key).cloned()
    }

    pub fn saves(&self, key: &str) -> usize {
        self.save_counts
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .unwrap_or(0)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing {
            return Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unavailable"),
            });
        }
        Ok(self.get(key))
    }

    fn save(&self, key: &str, json: &str) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unavailable"),
            });
        }
        self.insert(key, json);
        *self
            .save_counts
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default() += 1;
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        Self(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// How a [`FakeAdapter`] answers
#[derive(Clone)]
pub enum Script {
    Reply {
        text: String,
        recommendations: Vec<String>,
        confidence: f64,
        cost: f64,
    },
    Fail(String),
    /// Sleep before replying with a fixed text
    Slow(Duration),
}

pub struct FakeAdapter {
    id: ProviderId,
    script: Script,
    calls: AtomicUsize,
    visual_cost: Option<f64>,
}

impl FakeAdapter {
    pub fn replying(
        id: ProviderId,
        text: &str,
        recommendations: &[&str],
        confidence: f64,
        cost: f64,
    ) -> Self {
        Self::new(
            id,
            Script::Reply {
                text: text.to_string(),
                recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
                confidence,
                cost,
            },
        )
    }

    pub fn failing(id: ProviderId, error: &str) -> Self {
        Self::new(id, Script::Fail(error.to_string()))
    }

    pub fn slow(id: ProviderId, delay: Duration) -> Self {
        Self::new(id, Script::Slow(delay))
    }

    pub fn with_visuals(mut self, cost: f64) -> Self {
        self.visual_cost = Some(cost);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn new(id: ProviderId, script: Script) -> Self {
        Self {
            id,
            script,
            calls: AtomicUsize::new(0),
            visual_cost: None,
        }
    }
}

#[async_trait]
impl ProviderAdapter for FakeAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn invoke(
        &self,
        _task_id: &str,
        _payload: &Value,
    ) -> Result<ProviderReply, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply {
                text,
                recommendations,
                confidence,
                cost,
            } => Ok(ProviderReply {
                analysis_text: text.clone(),
                recommendations: recommendations.clone(),
                confidence: *confidence,
                cost_incurred: *cost,
                tokens_used: 500,
                timestamp: 1_700_000_000_000,
            }),
            Script::Fail(error) => Err(ProviderError::RequestFailed(error.clone())),
            Script::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(ProviderReply {
                    analysis_text: "late".to_string(),
                    recommendations: Vec::new(),
                    confidence: 0.5,
                    cost_incurred: 0.0,
                    tokens_used: 0,
                    timestamp: 0,
                })
            }
        }
    }

    async fn generate_visual(&self, brief: &str) -> Result<VisualAsset, ProviderError> {
        match self.visual_cost {
            Some(cost) => Ok(VisualAsset {
                asset_ref: format!("asset://{}", brief.len()),
                cost,
            }),
            None => Err(ProviderError::Unsupported {
                provider: self.id,
                capability: "visual generation",
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingLogger {
    pub fn types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

impl EventLogger for RecordingLogger {
    fn log(&self, event: RoutingEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}
