// src/analytics/provider.rs
// The sinks a Tracker forwards to.

use std::sync::{Arc, Mutex};

use clap::ValueEnum;

use super::AnalyticsEvent;

/// A destination for tracked events.
pub trait AnalyticsProvider: Send + Sync {
    fn name(&self) -> &str;
    fn track(&self, event: &AnalyticsEvent);
}

/// Writes each event as a structured log line under the `analytics` target.
#[derive(Debug, Default)]
pub struct TracingProvider;

impl AnalyticsProvider for TracingProvider {
    fn name(&self) -> &str {
        "log"
    }

    fn track(&self, event: &AnalyticsEvent) {
        let properties = serde_json::to_string(&event.properties).unwrap_or_default();
        tracing::info!(
            target: "analytics",
            event = %event.name,
            category = %event.category,
            label = event.label.as_deref().unwrap_or(""),
            value = event.value,
            %properties,
            "event tracked"
        );
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    name: String,
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemoryProvider {
    pub fn new(name: &str) -> Self {
        MemoryProvider {
            name: name.to_string(),
            events: Mutex::new(Vec::new()),
        }
    }

    /// A copy of the events received so far.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsProvider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn track(&self, event: &AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Providers selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Track nothing
    None,
    /// Log events through the regular log output
    Log,
}

impl ProviderKind {
    pub fn build(&self) -> Option<Arc<dyn AnalyticsProvider>> {
        match self {
            ProviderKind::None => None,
            ProviderKind::Log => Some(Arc::new(TracingProvider)),
        }
    }
}
