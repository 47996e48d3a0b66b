//! Error types for the Beacon protocol layer.

mod integration;
mod registry;

pub use integration::*;
pub use registry::*;
