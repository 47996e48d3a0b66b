//! Ready callbacks, fired once when an integration has been created.

use dashmap::DashMap;

use beacon_protocols::error::RegistryError;
use beacon_protocols::integration::Integration;

use super::validate_key;

/// Callback receiving the freshly created integration.
pub type ReadyCallback = Box<dyn FnOnce(&dyn Integration) + Send + Sync>;

/// Registry of ready callbacks keyed by integration key.
pub struct ReadyCallbackRegistry {
    callbacks: DashMap<String, ReadyCallback>,
}

impl ReadyCallbackRegistry {
    /// Create a new empty callback registry.
    pub fn new() -> Self {
        Self {
            callbacks: DashMap::new(),
        }
    }

    /// Add a callback for an integration key.
    ///
    /// A callback already waiting on the same key is replaced.
    pub fn add<F>(&self, key: impl Into<String>, callback: F) -> Result<(), RegistryError>
    where
        F: FnOnce(&dyn Integration) + Send + Sync + 'static,
    {
        let key = key.into();
        validate_key(&key)?;

        if self.callbacks.insert(key.clone(), Box::new(callback)).is_some() {
            tracing::debug!("Replaced ready callback for {}", key);
        }
        Ok(())
    }

    /// Remove and return the callback for a key.
    pub fn take(&self, key: &str) -> Option<ReadyCallback> {
        self.callbacks.remove(key).map(|(_, callback)| callback)
    }

    /// Keys with callbacks that have not fired yet.
    pub fn pending_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.callbacks.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl Default for ReadyCallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
