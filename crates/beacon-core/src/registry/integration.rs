//! Integration registry for native integration factories.

use parking_lot::RwLock;
use std::sync::Arc;

use tracing::{debug, info};

use beacon_protocols::error::RegistryError;
use beacon_protocols::integration::IntegrationFactory;

/// Check that an integration key can be registered.
pub fn validate_key(key: &str) -> Result<(), RegistryError> {
    if key.trim().is_empty() {
        return Err(RegistryError::InvalidFactory(
            "integration key is empty".to_string(),
        ));
    }

    if key.chars().any(char::is_control) {
        return Err(RegistryError::InvalidFactory(format!(
            "integration key {:?} contains control characters",
            key
        )));
    }

    Ok(())
}

/// Registry of integration factories, in registration order.
///
/// Keys are unique. Registering the same factory handle twice is a no-op;
/// registering a different factory under a taken key is rejected. Readers
/// get a snapshot copy, so a late registration never disturbs an ongoing
/// iteration.
pub struct IntegrationRegistry {
    factories: RwLock<Vec<Arc<dyn IntegrationFactory>>>,
}

impl IntegrationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(Vec::new()),
        }
    }

    /// Register a factory.
    ///
    /// Returns [`RegistryError::InvalidFactory`] for an empty or malformed
    /// key and [`RegistryError::DuplicateKey`] if another factory already
    /// holds the key. The registry is unchanged on error.
    pub fn register(&self, factory: Arc<dyn IntegrationFactory>) -> Result<(), RegistryError> {
        let key = factory.key().to_string();
        validate_key(&key)?;

        let mut factories = self.factories.write();
        if let Some(existing) = factories.iter().find(|f| f.key() == key) {
            if Arc::ptr_eq(existing, &factory) {
                debug!("Integration factory already registered: {}", key);
                return Ok(());
            }
            return Err(RegistryError::DuplicateKey(key));
        }

        factories.push(factory);
        info!("Integration factory registered: {}", key);
        Ok(())
    }

    /// Snapshot of all registered factories in registration order.
    pub fn list(&self) -> Vec<Arc<dyn IntegrationFactory>> {
        self.factories.read().clone()
    }

    /// List all registered keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.factories
            .read()
            .iter()
            .map(|f| f.key().to_string())
            .collect()
    }

    /// Get a factory by key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn IntegrationFactory>> {
        self.factories.read().iter().find(|f| f.key() == key).cloned()
    }

    /// Check if a factory with the given key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.factories.read().iter().any(|f| f.key() == key)
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl Default for IntegrationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "integration_tests.rs"]
mod tests;
