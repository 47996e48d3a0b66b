//! Bridge errors.

use thiserror::Error;

use beacon_config::ConfigError;
use beacon_protocols::error::RegistryError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Duplicate analytics client: already set up with a different configuration")]
    Reconfigured,

    #[error("Analytics client is not set up")]
    NotSetup,

    #[error("Analytics client setup re-entered while building")]
    SetupInProgress,
}

impl BridgeError {
    /// Stable code reported back to the script runtime.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Registry(RegistryError::InvalidFactory(_)) => "E_INVALID_FACTORY",
            BridgeError::Registry(RegistryError::DuplicateKey(_)) => "E_DUPLICATE_KEY",
            BridgeError::Config(_) => "E_INVALID_CONFIG",
            BridgeError::Reconfigured => "E_RECONFIGURED",
            BridgeError::NotSetup => "E_NOT_SETUP",
            BridgeError::SetupInProgress => "E_SETUP_IN_PROGRESS",
        }
    }
}
