//! Analytics client core.
//!
//! The client is built once from a snapshot of the [`IntegrationRegistry`]
//! and owns the integrations created from it. Registrations that arrive
//! after the build are not picked up.
//!
//! [`IntegrationRegistry`]: crate::registry::IntegrationRegistry

mod builder;

pub use builder::{ClientBuilder, ReadyDispatch};

use std::sync::Arc;

use tracing::{info, warn};

use beacon_protocols::integration::Integration;

/// An integration that failed to be created or to run a lifecycle callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationFailure {
    pub key: String,
    pub reason: String,
}

impl IntegrationFailure {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of forwarding a lifecycle callback to every integration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    pub attempted: usize,
    pub failures: Vec<IntegrationFailure>,
}

impl LifecycleReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum LifecycleEvent {
    Flush,
    Reset,
}

impl LifecycleEvent {
    fn as_str(&self) -> &'static str {
        match self {
            LifecycleEvent::Flush => "flush",
            LifecycleEvent::Reset => "reset",
        }
    }
}

/// Analytics client holding the instantiated integrations.
pub struct AnalyticsClient {
    integrations: Vec<Arc<dyn Integration>>,
    skipped: Vec<String>,
    failed: Vec<IntegrationFailure>,
}

impl AnalyticsClient {
    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Integrations in registration order.
    pub fn integrations(&self) -> &[Arc<dyn Integration>] {
        &self.integrations
    }

    /// Keys of the created integrations in registration order.
    pub fn integration_keys(&self) -> Vec<String> {
        self.integrations.iter().map(|i| i.key().to_string()).collect()
    }

    /// Get an integration by key.
    pub fn integration(&self, key: &str) -> Option<Arc<dyn Integration>> {
        self.integrations.iter().find(|i| i.key() == key).cloned()
    }

    /// Keys of registered factories that were disabled or absent from settings.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Factories whose `create` call failed.
    pub fn failed(&self) -> &[IntegrationFailure] {
        &self.failed
    }

    /// Ask every integration to flush buffered events.
    pub async fn flush(&self) -> LifecycleReport {
        self.dispatch(LifecycleEvent::Flush).await
    }

    /// Ask every integration to clear user state.
    pub async fn reset(&self) -> LifecycleReport {
        self.dispatch(LifecycleEvent::Reset).await
    }

    async fn dispatch(&self, event: LifecycleEvent) -> LifecycleReport {
        let mut report = LifecycleReport::default();

        for integration in &self.integrations {
            report.attempted += 1;
            let result = match event {
                LifecycleEvent::Flush => integration.flush().await,
                LifecycleEvent::Reset => integration.reset().await,
            };

            if let Err(e) = result {
                warn!(
                    "Integration {} failed to {}: {}",
                    integration.key(),
                    event.as_str(),
                    e
                );
                report
                    .failures
                    .push(IntegrationFailure::new(integration.key(), e.to_string()));
            }
        }

        info!(
            "Dispatched {} to {} integrations ({} failed)",
            event.as_str(),
            report.attempted,
            report.failures.len()
        );
        report
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
