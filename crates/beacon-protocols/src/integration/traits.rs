//! Integration and factory trait definitions.

use async_trait::async_trait;
use std::any::Any;

use super::IntegrationSettings;
use crate::error::IntegrationError;

/// A platform-specific analytics destination adapter.
///
/// Instances are produced by an [`IntegrationFactory`] when the analytics
/// client is built and are driven through the lifecycle callbacks below.
#[async_trait]
pub trait Integration: Send + Sync + 'static {
    /// Key of the factory that created this integration.
    fn key(&self) -> &str;

    /// Flush any events buffered by the underlying SDK.
    async fn flush(&self) -> Result<(), IntegrationError> {
        Ok(())
    }

    /// Clear any user state held by the underlying SDK.
    async fn reset(&self) -> Result<(), IntegrationError> {
        Ok(())
    }

    /// Returns a reference to the integration as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Capability supplied by a native package to create its integration.
///
/// The key identifies the integration in project settings and must be
/// stable across releases.
pub trait IntegrationFactory: Send + Sync {
    /// Returns the identifying key (e.g. `"Firebase"`).
    fn key(&self) -> &str;

    /// Create a configured integration instance.
    fn create(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<Box<dyn Integration>, IntegrationError>;
}
