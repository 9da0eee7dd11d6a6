// src/analytics/mod.rs
// =============================================================================
// Event tracking with several sinks.
//
// A Tracker owns the list of providers it forwards to. The list is built by
// the caller at startup and passed in: there is no global tracker, so which
// providers are active is decided in one place and tests can inject their
// own.
//
// Fan-out is synchronous and in provider order. `track_when_idle` moves the
// whole fan-out onto an idle slot so the caller's path never pays for it.
// =============================================================================

mod provider;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scheduler::{on_idle, IdleHandle, DEFAULT_IDLE_TIMEOUT};

pub use provider::{AnalyticsProvider, MemoryProvider, ProviderKind, TracingProvider};

/// One tracked event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: &str, category: &str) -> Self {
        AnalyticsEvent {
            name: name.to_string(),
            category: category.to_string(),
            label: None,
            value: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Forwards events to every provider it was built with.
#[derive(Clone, Default)]
pub struct Tracker {
    providers: Arc<Vec<Arc<dyn AnalyticsProvider>>>,
}

impl Tracker {
    pub fn new(providers: Vec<Arc<dyn AnalyticsProvider>>) -> Self {
        Tracker {
            providers: Arc::new(providers),
        }
    }

    /// Builds a tracker with one provider per requested kind.
    pub fn from_kinds(kinds: &[ProviderKind]) -> Self {
        Tracker::new(kinds.iter().filter_map(ProviderKind::build).collect())
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Sends `event` to every provider, in order, before returning.
    pub fn track(&self, event: &AnalyticsEvent) {
        for provider in self.providers.iter() {
            provider.track(event);
        }
    }

    /// Sends `event` to every provider at the next idle slot.
    /// Must be called inside a tokio runtime.
    pub fn track_when_idle(&self, event: AnalyticsEvent) -> IdleHandle {
        let tracker = self.clone();
        on_idle(move || tracker.track(&event), DEFAULT_IDLE_TIMEOUT)
    }
}
