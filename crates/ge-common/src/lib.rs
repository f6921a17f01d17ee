//! Gene-entropy common types and errors.
//!
//! This crate provides the value types shared across the workspace:
//! - Validated model parameters with closed-form moments
//! - Precision/truncation specification
//! - Quantity selectors for the derived information measures
//! - Evaluation results with an explicit not-a-number outcome
//! - The unified error taxonomy

pub mod error;
pub mod params;
pub mod precision;
pub mod quantity;
pub mod result;

pub use error::{Error, ErrorCategory, Result};
pub use params::Parameters;
pub use precision::PrecisionSpec;
pub use quantity::Quantity;
pub use result::EvalResult;
