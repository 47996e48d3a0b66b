//! Analytics bridge module.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use tracing::{debug, info, warn};

use beacon_config::{Config, ConfigValidator};
use beacon_core::{
    AnalyticsClient, IntegrationRegistry, LifecycleReport, ReadyCallbackRegistry,
};
use beacon_protocols::integration::{Integration, IntegrationFactory};

use crate::error::BridgeError;

struct ConfiguredClient {
    config: Config,
    client: Arc<AnalyticsClient>,
}

/// State of the client slot.
///
/// The lock is only held to move between states. Factories and ready
/// callbacks always run with the lock released.
enum ClientSlot {
    Empty,
    /// A setup on the given thread is creating integrations.
    Building(ThreadId),
    Ready(ConfiguredClient),
}

/// Bridge between native integration packages and the analytics client.
pub struct AnalyticsBridge {
    registry: Arc<IntegrationRegistry>,
    callbacks: Arc<ReadyCallbackRegistry>,
    slot: Mutex<ClientSlot>,
    slot_changed: Condvar,
}

/// Puts the slot back to `Empty` if a build unwinds before it completes,
/// so waiting setups can retry.
struct BuildGuard<'a> {
    bridge: &'a AnalyticsBridge,
    completed: bool,
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            warn!("Analytics client build aborted");
            *self.bridge.slot.lock() = ClientSlot::Empty;
        }
        self.bridge.slot_changed.notify_all();
    }
}

impl AnalyticsBridge {
    /// Create a bridge with empty registries.
    pub fn new() -> Self {
        Self::with_registries(
            Arc::new(IntegrationRegistry::new()),
            Arc::new(ReadyCallbackRegistry::new()),
        )
    }

    /// Create a bridge over existing registries.
    pub fn with_registries(
        registry: Arc<IntegrationRegistry>,
        callbacks: Arc<ReadyCallbackRegistry>,
    ) -> Self {
        Self {
            registry,
            callbacks,
            slot: Mutex::new(ClientSlot::Empty),
            slot_changed: Condvar::new(),
        }
    }

    /// Register a native integration factory.
    ///
    /// Must run before [`setup`](Self::setup) for the integration to be
    /// created. A registration after setup is kept but only logged.
    pub fn add_integration(&self, factory: Arc<dyn IntegrationFactory>) -> Result<(), BridgeError> {
        let key = factory.key().to_string();
        self.registry.register(factory)?;

        if self.is_setup() {
            warn!(
                "Integration {} registered after setup; the current client will not create it",
                key
            );
        }
        Ok(())
    }

    /// Register a callback fired with the integration once it is created.
    pub fn add_on_ready_callback<F>(&self, key: impl Into<String>, callback: F) -> Result<(), BridgeError>
    where
        F: FnOnce(&dyn Integration) + Send + Sync + 'static,
    {
        self.callbacks.add(key, callback)?;
        Ok(())
    }

    /// Build the analytics client from the registered factories.
    ///
    /// Calling again with an equal configuration returns the existing
    /// client. A different configuration fails with
    /// [`BridgeError::Reconfigured`]. Concurrent calls wait for the one
    /// that is building.
    ///
    /// Ready callbacks fire after the client is published, so they may call
    /// back into the bridge.
    pub fn setup(&self, config: Config) -> Result<Arc<AnalyticsClient>, BridgeError> {
        let current = thread::current().id();
        let mut slot = self.slot.lock();

        loop {
            let building_here = match &*slot {
                ClientSlot::Ready(existing) => {
                    if existing.config == config {
                        return Ok(existing.client.clone());
                    }
                    return Err(BridgeError::Reconfigured);
                }
                ClientSlot::Building(owner) => *owner == current,
                ClientSlot::Empty => break,
            };
            if building_here {
                return Err(BridgeError::SetupInProgress);
            }
            debug!("Waiting for a concurrent setup to finish");
            self.slot_changed.wait(&mut slot);
        }

        let warnings = ConfigValidator::validate(&config).into_result()?;
        for warning in warnings {
            warn!("Config {}: {}", warning.path, warning.message);
        }

        *slot = ClientSlot::Building(current);
        drop(slot);
        let mut guard = BuildGuard {
            bridge: self,
            completed: false,
        };

        info!(
            "Setting up analytics client with {} registered integrations",
            self.registry.len()
        );

        let (client, ready) = AnalyticsClient::builder()
            .settings(config.integrations.clone())
            .callbacks(self.callbacks.clone())
            .build_deferred(&self.registry);
        let client = Arc::new(client);

        *self.slot.lock() = ClientSlot::Ready(ConfiguredClient {
            config,
            client: client.clone(),
        });
        guard.completed = true;
        drop(guard);

        ready.fire();
        Ok(client)
    }

    /// The client built by [`setup`](Self::setup), if any.
    pub fn client(&self) -> Option<Arc<AnalyticsClient>> {
        match &*self.slot.lock() {
            ClientSlot::Ready(configured) => Some(configured.client.clone()),
            ClientSlot::Empty | ClientSlot::Building(_) => None,
        }
    }

    pub fn is_setup(&self) -> bool {
        matches!(*self.slot.lock(), ClientSlot::Ready(_))
    }

    /// Forward a flush to every created integration.
    pub async fn flush(&self) -> Result<LifecycleReport, BridgeError> {
        let client = self.client().ok_or(BridgeError::NotSetup)?;
        Ok(client.flush().await)
    }

    /// Forward a reset to every created integration.
    pub async fn reset(&self) -> Result<LifecycleReport, BridgeError> {
        let client = self.client().ok_or(BridgeError::NotSetup)?;
        Ok(client.reset().await)
    }

    pub fn registry(&self) -> &Arc<IntegrationRegistry> {
        &self.registry
    }

    pub fn callbacks(&self) -> &Arc<ReadyCallbackRegistry> {
        &self.callbacks
    }
}

impl Default for AnalyticsBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
