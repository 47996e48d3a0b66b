//! Client builder.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, info, warn};

use beacon_protocols::integration::{Integration, IntegrationSettings};

use super::{AnalyticsClient, IntegrationFailure};
use crate::registry::{IntegrationRegistry, ReadyCallback, ReadyCallbackRegistry};

/// Ready callbacks taken during a build, waiting to be fired.
///
/// Returned by [`ClientBuilder::build_deferred`] so the caller can publish
/// the client before any user code runs.
#[must_use = "ready callbacks are lost unless fired"]
pub struct ReadyDispatch {
    pending: Vec<(ReadyCallback, Arc<dyn Integration>)>,
}

impl ReadyDispatch {
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fire every callback in creation order and return how many completed.
    ///
    /// A panicking callback is logged and does not stop the ones after it.
    pub fn fire(self) -> usize {
        let mut completed = 0;
        for (callback, integration) in self.pending {
            let key = integration.key().to_string();
            debug!("Firing ready callback for {}", key);
            match panic::catch_unwind(AssertUnwindSafe(|| callback(integration.as_ref()))) {
                Ok(()) => completed += 1,
                Err(payload) => {
                    warn!(
                        "Ready callback for {} panicked: {}",
                        key,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        completed
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Builds an [`AnalyticsClient`] from the registered factories.
///
/// Each factory is instantiated in registration order with the settings
/// stored under its key. Factories without settings, or with settings that
/// disable them, are skipped.
#[derive(Default)]
pub struct ClientBuilder {
    settings: HashMap<String, IntegrationSettings>,
    callbacks: Option<Arc<ReadyCallbackRegistry>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the per-integration settings.
    pub fn settings(mut self, settings: HashMap<String, IntegrationSettings>) -> Self {
        self.settings = settings;
        self
    }

    /// Set the settings for a single integration.
    pub fn integration(mut self, key: impl Into<String>, settings: IntegrationSettings) -> Self {
        self.settings.insert(key.into(), settings);
        self
    }

    /// Ready callbacks to fire as integrations are created.
    pub fn callbacks(mut self, callbacks: Arc<ReadyCallbackRegistry>) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Instantiate every enabled integration in the registry and fire the
    /// matching ready callbacks.
    pub fn build(self, registry: &IntegrationRegistry) -> AnalyticsClient {
        let (client, ready) = self.build_deferred(registry);
        ready.fire();
        client
    }

    /// Instantiate every enabled integration without running any ready
    /// callback. The callbacks are taken from the registry and handed back.
    pub fn build_deferred(
        self,
        registry: &IntegrationRegistry,
    ) -> (AnalyticsClient, ReadyDispatch) {
        let mut integrations: Vec<Arc<dyn Integration>> = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();
        let mut pending = Vec::new();

        for factory in registry.list() {
            let key = factory.key();

            let Some(settings) = self.settings.get(key).filter(|s| s.is_enabled()) else {
                debug!("Integration {} not enabled in settings, skipping", key);
                skipped.push(key.to_string());
                continue;
            };

            match factory.create(settings) {
                Ok(integration) => {
                    let integration: Arc<dyn Integration> = Arc::from(integration);
                    if let Some(callback) = self.callbacks.as_ref().and_then(|c| c.take(key)) {
                        pending.push((callback, integration.clone()));
                    }
                    integrations.push(integration);
                }
                Err(e) => {
                    warn!("Failed to create integration {}: {}", key, e);
                    failed.push(IntegrationFailure::new(key, e.to_string()));
                }
            }
        }

        if let Some(callbacks) = &self.callbacks {
            for key in callbacks.pending_keys() {
                warn!("Ready callback for {} has no created integration", key);
            }
        }

        info!(
            "Analytics client built with {} integrations ({} skipped, {} failed)",
            integrations.len(),
            skipped.len(),
            failed.len()
        );

        let client = AnalyticsClient {
            integrations,
            skipped,
            failed,
        };
        (client, ReadyDispatch { pending })
    }
}
