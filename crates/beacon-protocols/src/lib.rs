//! # Beacon Protocols
//!
//! Core protocol definitions (traits) for the Beacon integration registry.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`IntegrationFactory`] - Capability supplied by a native package that
//!   produces a configured [`Integration`]
//! - [`Integration`] - A platform-specific analytics destination adapter

pub mod error;
pub mod integration;

pub use error::{IntegrationError, RegistryError};
pub use integration::{Integration, IntegrationFactory, IntegrationSettings};
