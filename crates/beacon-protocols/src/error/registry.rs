//! Registration errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid integration factory: {0}")]
    InvalidFactory(String),

    #[error("Integration already registered: {0}")]
    DuplicateKey(String),
}

impl RegistryError {
    /// Key the error refers to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            RegistryError::InvalidFactory(_) => None,
            RegistryError::DuplicateKey(key) => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_factory_error() {
        let err = RegistryError::InvalidFactory("key is empty".to_string());
        let display = err.to_string();
        assert!(display.contains("Invalid integration factory"));
        assert!(display.contains("key is empty"));
        assert!(err.key().is_none());
    }

    #[test]
    fn test_duplicate_key_error() {
        let err = RegistryError::DuplicateKey("Firebase".to_string());
        let display = err.to_string();
        assert!(display.contains("already registered"));
        assert!(display.contains("Firebase"));
        assert_eq!(err.key(), Some("Firebase"));
    }

    #[test]
    fn test_error_debug() {
        let err = RegistryError::DuplicateKey("test".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("DuplicateKey"));
    }
}
