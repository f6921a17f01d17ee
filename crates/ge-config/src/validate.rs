//! Sweep configuration validation.
//!
//! Configuration problems are fatal to the whole sweep and must surface
//! before any computation starts, so every figure and axis is checked at
//! load time.

use crate::sweep::{Axis, SweepConfig};
use ge_common::precision::MAX_DIGITS;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Semantic validation failed: {0}")]
    Semantic(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::Io(_) => 30,
            ValidationError::Parse(_) => 31,
            ValidationError::VersionMismatch { .. } => 32,
            ValidationError::Semantic(_) => 33,
            ValidationError::InvalidValue { .. } => 34,
        }
    }
}

impl From<ValidationError> for ge_common::Error {
    fn from(err: ValidationError) -> Self {
        ge_common::Error::Config(err.to_string())
    }
}

/// Validate a sweep configuration semantically.
pub fn validate_config(config: &SweepConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    validate_digits("defaults.digits", config.defaults.digits)?;
    if config.defaults.workers == Some(0) {
        return Err(ValidationError::InvalidValue {
            field: "defaults.workers".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if config.figures.is_empty() {
        return Err(ValidationError::Semantic(
            "no figures defined; nothing to sweep".to_string(),
        ));
    }

    for (name, figure) in &config.figures {
        if figure.quantities.is_empty() {
            return Err(ValidationError::Semantic(format!(
                "figure '{name}' selects no quantities"
            )));
        }
        if let Some(q) = figure.quantities.iter().find(|q| !q.is_entropy_family()) {
            return Err(ValidationError::InvalidValue {
                field: format!("figures.{name}.quantities"),
                message: format!("'{q}' is a per-state mass term, not sweepable"),
            });
        }
        if let Some(digits) = figure.digits {
            validate_digits(&format!("figures.{name}.digits"), digits)?;
        }
        validate_axis(name, "epsilon", &figure.epsilon)?;
        validate_axis(name, "palpha", &figure.palpha)?;
        validate_axis(name, "n_mean", &figure.n_mean)?;
    }

    Ok(())
}

fn validate_digits(field: &str, digits: u32) -> ValidationResult<()> {
    if digits == 0 || digits > MAX_DIGITS {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("must be between 1 and {MAX_DIGITS}, got {digits}"),
        });
    }
    Ok(())
}

fn validate_axis(figure: &str, param: &str, axis: &Axis) -> ValidationResult<()> {
    let field = format!("figures.{figure}.{param}");

    if axis.is_empty() {
        return Err(ValidationError::InvalidValue {
            field,
            message: "axis expands to an empty grid".to_string(),
        });
    }

    if let Axis::Range(r) = axis {
        if !r.from.is_finite() || !r.to.is_finite() {
            return Err(ValidationError::InvalidValue {
                field,
                message: "range endpoints must be finite".to_string(),
            });
        }
        if r.log && (r.from <= 0.0 || r.to <= 0.0) {
            return Err(ValidationError::InvalidValue {
                field,
                message: "log-spaced range requires positive endpoints".to_string(),
            });
        }
    }

    for v in axis.values() {
        if !v.is_finite() {
            return Err(ValidationError::InvalidValue {
                field,
                message: "axis contains a non-finite value".to_string(),
            });
        }
        // Parameter-specific domain; full validation happens again at
        // Parameters::new, but bad axes should fail the sweep up front.
        let in_domain = match param {
            "palpha" => v > 0.0 && v < 1.0,
            _ => v > 0.0,
        };
        if !in_domain {
            return Err(ValidationError::InvalidValue {
                field,
                message: format!("value {v} is outside the domain of {param}"),
            });
        }
    }

    Ok(())
}
