//! Integration-related errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Integration {key} could not be created: {reason}")]
    CreationFailed { key: String, reason: String },

    #[error("Integration {key} lifecycle callback failed: {reason}")]
    Lifecycle { key: String, reason: String },

    #[error("{0}")]
    Custom(String),
}

impl IntegrationError {
    pub fn creation_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CreationFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn lifecycle(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Lifecycle {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_failed_error() {
        let err = IntegrationError::creation_failed("Amplitude", "missing api_key");
        let display = err.to_string();
        assert!(display.contains("Amplitude"));
        assert!(display.contains("could not be created"));
        assert!(display.contains("missing api_key"));
    }

    #[test]
    fn test_lifecycle_error() {
        let err = IntegrationError::lifecycle("Firebase", "sdk not started");
        let display = err.to_string();
        assert!(display.contains("Firebase"));
        assert!(display.contains("sdk not started"));
    }

    #[test]
    fn test_custom_error() {
        let err = IntegrationError::Custom("custom error message".to_string());
        assert_eq!(err.to_string(), "custom error message");
    }
}
