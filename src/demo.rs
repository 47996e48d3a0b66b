//! Built-in demo integrations.
//!
//! Stand-ins for the factories native packages would register. Each one
//! logs its lifecycle callbacks instead of talking to a vendor SDK.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use beacon_protocols::error::IntegrationError;
use beacon_protocols::integration::{Integration, IntegrationFactory, IntegrationSettings};

/// Keys registered by default, in registration order.
pub const DEMO_INTEGRATIONS: &[&str] = &["Firebase", "Amplitude", "Adjust"];

/// Integration that records lifecycle callbacks in the log.
pub struct LogIntegration {
    key: String,
    settings: IntegrationSettings,
}

impl LogIntegration {
    pub fn settings(&self) -> &IntegrationSettings {
        &self.settings
    }
}

#[async_trait]
impl Integration for LogIntegration {
    fn key(&self) -> &str {
        &self.key
    }

    async fn flush(&self) -> Result<(), IntegrationError> {
        info!(
            integration = %self.key,
            options = self.settings().options().len(),
            "flush"
        );
        Ok(())
    }

    async fn reset(&self) -> Result<(), IntegrationError> {
        info!(integration = %self.key, "reset");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Factory for [`LogIntegration`].
///
/// When `required_option` is set, creation fails unless the settings carry
/// that option.
pub struct LogIntegrationFactory {
    key: String,
    required_option: Option<String>,
}

impl LogIntegrationFactory {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required_option: None,
        }
    }

    pub fn requiring(mut self, option: impl Into<String>) -> Self {
        self.required_option = Some(option.into());
        self
    }
}

impl IntegrationFactory for LogIntegrationFactory {
    fn key(&self) -> &str {
        &self.key
    }

    fn create(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<Box<dyn Integration>, IntegrationError> {
        if let Some(option) = &self.required_option {
            if !settings.options().contains_key(option) {
                return Err(IntegrationError::creation_failed(
                    &self.key,
                    format!("missing option '{}'", option),
                ));
            }
        }

        Ok(Box::new(LogIntegration {
            key: self.key.clone(),
            settings: settings.clone(),
        }))
    }
}

/// Factories for [`DEMO_INTEGRATIONS`] followed by any extra keys.
pub fn demo_factories(extra: &[String]) -> Vec<Arc<dyn IntegrationFactory>> {
    DEMO_INTEGRATIONS
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str))
        .map(|key| {
            let factory = match key {
                "Amplitude" => LogIntegrationFactory::new(key).requiring("api_key"),
                _ => LogIntegrationFactory::new(key),
            };
            Arc::new(factory) as Arc<dyn IntegrationFactory>
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_demo_factories_order() {
        let factories = demo_factories(&["Braze".to_string()]);
        let keys: Vec<&str> = factories.iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["Firebase", "Amplitude", "Adjust", "Braze"]);
    }

    #[test]
    fn test_required_option_missing() {
        let factory = LogIntegrationFactory::new("Amplitude").requiring("api_key");
        let result = factory.create(&IntegrationSettings::enabled());
        assert!(result.is_err());
    }

    #[test]
    fn test_required_option_present() {
        let factory = LogIntegrationFactory::new("Amplitude").requiring("api_key");
        let settings: IntegrationSettings =
            serde_json::from_value(json!({ "api_key": "abc" })).unwrap();
        let integration = factory.create(&settings).unwrap();

        let log = integration.as_any().downcast_ref::<LogIntegration>().unwrap();
        assert_eq!(log.settings().get::<String>("api_key"), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_lifecycle_callbacks_succeed() {
        let integration = LogIntegrationFactory::new("Firebase")
            .create(&IntegrationSettings::enabled())
            .unwrap();
        assert!(integration.flush().await.is_ok());
        assert!(integration.reset().await.is_ok());
    }
}
