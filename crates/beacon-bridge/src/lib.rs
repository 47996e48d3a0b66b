//! # Beacon Bridge
//!
//! The module the cross-platform runtime talks to. Native packages call
//! [`AnalyticsBridge::add_integration`] during application startup, and the
//! script side calls [`AnalyticsBridge::setup`] once to build the client.
//!
//! The bridge is an explicit context object: the application shell creates
//! it and hands it to whatever needs to register or dispatch.

mod bridge;
mod error;

pub use bridge::AnalyticsBridge;
pub use error::BridgeError;
