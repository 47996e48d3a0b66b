//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_client(config, &mut result);
        Self::validate_integrations(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_client(config: &Config, result: &mut ValidationResult) {
        if config.client.write_key.trim().is_empty() {
            result.add_error(ValidationError::new(
                "client.write_key",
                "Write key cannot be empty",
            ));
        }

        if config.client.flush_at == 0 {
            result.add_error(ValidationError::new(
                "client.flush_at",
                "Flush threshold must be greater than 0",
            ));
        }

        if config.client.flush_interval_ms == Some(0) {
            result.add_error(ValidationError::new(
                "client.flush_interval_ms",
                "Flush interval must be greater than 0",
            ));
        }
    }

    fn validate_integrations(config: &Config, result: &mut ValidationResult) {
        if config.integrations.is_empty() {
            result.add_warning(ValidationWarning::new(
                "integrations",
                "No integrations configured; registered factories will not be created",
            ));
        }

        let mut keys: Vec<&String> = config.integrations.keys().collect();
        keys.sort();

        for key in keys {
            let path = format!("integrations.{}", key);
            if key.trim().is_empty() {
                result.add_error(ValidationError::new(path, "Integration key cannot be empty"));
            } else if !config.integrations[key].is_enabled() {
                result.add_warning(ValidationWarning::new(path, "Integration is disabled"));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', expected one of {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
