//! Registries for integration factories and ready callbacks.

mod callbacks;
mod integration;

pub use callbacks::{ReadyCallback, ReadyCallbackRegistry};
pub use integration::{validate_key, IntegrationRegistry};
