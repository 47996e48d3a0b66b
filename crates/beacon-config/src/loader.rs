//! Configuration loader.
//!
//! Files are parsed as TOML before anything is substituted. `${VAR}`
//! references are then resolved inside string values only, so comments,
//! keys and the document structure are never touched by the environment.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use toml::{Table, Value};

use crate::error::ConfigError;
use crate::schema::Config;

const ENV_REFERENCE: &str = r"\$\{([^}]+)\}";

/// Loads [`Config`] from TOML files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Self::load_str(&fs::read_to_string(path)?)
    }

    /// Load configuration from a TOML string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let mut document = Value::Table(content.parse::<Table>()?);
        EnvExpander::new()?.expand(&mut document)?;
        Ok(document.try_into::<Config>()?)
    }

    /// Default location: `<config dir>/beacon/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("beacon").join("config.toml"))
    }

    /// Expand a leading `~` to the home directory.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).into_owned()
    }
}

/// Resolves `${VAR}` references in parsed TOML values.
struct EnvExpander {
    reference: Regex,
}

impl EnvExpander {
    fn new() -> Result<Self, ConfigError> {
        let reference =
            Regex::new(ENV_REFERENCE).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Ok(Self { reference })
    }

    fn expand(&self, value: &mut Value) -> Result<(), ConfigError> {
        match value {
            Value::String(text) => {
                if let Some(expanded) = self.expand_str(text)? {
                    *text = expanded;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.expand(item)?;
                }
            }
            Value::Table(table) => {
                for (_, item) in table.iter_mut() {
                    self.expand(item)?;
                }
            }
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Datetime(_) => {}
        }
        Ok(())
    }

    /// Returns `None` when `text` holds no reference. Substituted values
    /// are inserted as-is and never expanded again.
    fn expand_str(&self, text: &str) -> Result<Option<String>, ConfigError> {
        let mut expanded = String::with_capacity(text.len());
        let mut copied = 0;

        for cap in self.reference.captures_iter(text) {
            let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            let var = env::var(name.as_str())
                .map_err(|_| ConfigError::EnvVarNotSet(name.as_str().to_string()))?;
            expanded.push_str(&text[copied..whole.start()]);
            expanded.push_str(&var);
            copied = whole.end();
        }

        if copied == 0 {
            return Ok(None);
        }
        expanded.push_str(&text[copied..]);
        Ok(Some(expanded))
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
