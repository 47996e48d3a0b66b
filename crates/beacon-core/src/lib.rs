//! # Beacon Core
//!
//! Integration registry and analytics client core.
//!
//! ## Components
//!
//! - [`IntegrationRegistry`] - Ordered store of native integration factories
//! - [`ReadyCallbackRegistry`] - Callbacks fired when an integration is created
//! - [`AnalyticsClient`] - Instantiates registered integrations and drives
//!   their lifecycle

pub mod client;
pub mod registry;

pub use client::{
    AnalyticsClient, ClientBuilder, IntegrationFailure, LifecycleReport, ReadyDispatch,
};
pub use registry::{IntegrationRegistry, ReadyCallback, ReadyCallbackRegistry};
