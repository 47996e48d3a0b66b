//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use beacon_protocols::integration::IntegrationSettings;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    /// Project settings keyed by integration key.
    #[serde(default)]
    pub integrations: HashMap<String, IntegrationSettings>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Keys of the integrations enabled in settings, sorted.
    pub fn enabled_integrations(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .integrations
            .iter()
            .filter(|(_, settings)| settings.is_enabled())
            .map(|(key, _)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Analytics client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub write_key: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_flush_at")]
    pub flush_at: u32,

    #[serde(default)]
    pub flush_interval_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            write_key: String::new(),
            debug: false,
            flush_at: default_flush_at(),
            flush_interval_ms: None,
        }
    }
}

fn default_flush_at() -> u32 {
    20
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
