//! Integration protocol definitions.

mod settings;
mod traits;

pub use settings::*;
pub use traits::*;
