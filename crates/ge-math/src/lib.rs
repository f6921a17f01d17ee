//! Gene-entropy math utilities.

pub mod math;

pub use math::kummer::*;
pub use math::stable::*;
pub use math::sum::*;
