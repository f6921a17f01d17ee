//! Gene-entropy sweep configuration loading and validation.
//!
//! This crate provides:
//! - Typed structs for the sweep JSON (figure name -> parameter axes)
//! - Axis expansion (scalars, explicit lists, linear/log ranges)
//! - Semantic validation, run before any computation starts

pub mod sweep;
pub mod validate;

pub use sweep::{Axis, Defaults, FigureSpec, RangeAxis, SweepConfig};
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for sweep configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
