//! Per-integration settings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Options object handed to a factory.
pub type IntegrationOptions = serde_json::Map<String, serde_json::Value>;

/// Settings for a single integration.
///
/// Serialized as either a boolean or an object: `false` disables the
/// integration, `true` enables it with no options, and an object enables it
/// with those options.
///
/// A disabled value never carries options: every constructor either enables
/// the integration or leaves the options empty, so both forms round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSettings", into = "RawSettings")]
pub struct IntegrationSettings {
    enabled: bool,
    options: IntegrationOptions,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawSettings {
    Flag(bool),
    Options(IntegrationOptions),
}

impl From<RawSettings> for IntegrationSettings {
    fn from(raw: RawSettings) -> Self {
        match raw {
            RawSettings::Flag(enabled) => Self {
                enabled,
                options: IntegrationOptions::new(),
            },
            RawSettings::Options(options) => Self::with_options(options),
        }
    }
}

impl From<IntegrationSettings> for RawSettings {
    fn from(settings: IntegrationSettings) -> Self {
        if settings.enabled && !settings.options.is_empty() {
            RawSettings::Options(settings.options)
        } else {
            RawSettings::Flag(settings.enabled)
        }
    }
}

impl IntegrationSettings {
    /// Enabled with no options.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            options: IntegrationOptions::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Enabled with the given options.
    pub fn with_options(options: IntegrationOptions) -> Self {
        Self {
            enabled: true,
            options,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn options(&self) -> &IntegrationOptions {
        &self.options
    }

    /// Get an option value, deserialized into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
