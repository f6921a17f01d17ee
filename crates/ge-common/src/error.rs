//! Error types for the gene-entropy workspace.
//!
//! The taxonomy separates three failure classes with different blast radii:
//! - `Domain`/`Precision`: one evaluation rejected up front; the sweep goes on.
//! - `NonConvergent`: the series produced no finite value; converted to the
//!   `NaN` sentinel at the engine boundary, never into a sweep abort.
//! - `Config`: the sweep specification itself is bad; fatal before any
//!   computation starts.
//!
//! Domain and convergence errors always carry the full offending parameter
//! tuple so a failure can be reproduced from the log line alone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gene-entropy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Parameter or precision outside the valid domain.
    Domain,
    /// Numerical evaluation failure (non-convergence, non-finite result).
    Numeric,
    /// Sweep configuration errors.
    Config,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Domain => write!(f, "domain"),
            ErrorCategory::Numeric => write!(f, "numeric"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the gene-entropy workspace.
#[derive(Error, Debug)]
pub enum Error {
    // Domain errors (10-19)
    #[error(
        "parameter out of domain: {reason} \
         (epsilon={epsilon}, palpha={palpha}, n_mean={n_mean})"
    )]
    Domain {
        reason: String,
        epsilon: f64,
        palpha: f64,
        n_mean: f64,
    },

    #[error("parameter out of domain: {param}={value}: {reason}")]
    DomainValue {
        param: String,
        value: f64,
        reason: String,
    },

    #[error("invalid precision: {0}")]
    Precision(String),

    // Numeric errors (20-29)
    #[error(
        "series did not converge: {reason} \
         (epsilon={epsilon}, palpha={palpha}, n_mean={n_mean})"
    )]
    NonConvergent {
        reason: String,
        epsilon: f64,
        palpha: f64,
        n_mean: f64,
    },

    // Configuration errors (30-39)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (40-49)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Codes are grouped by category:
    /// - 10-19: Domain errors
    /// - 20-29: Numeric errors
    /// - 30-39: Configuration errors
    /// - 40-49: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Domain { .. } => 10,
            Error::Precision(_) => 11,
            Error::DomainValue { .. } => 12,
            Error::NonConvergent { .. } => 20,
            Error::Config(_) => 30,
            Error::Io(_) => 40,
            Error::Json(_) => 41,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Domain { .. } | Error::DomainValue { .. } | Error::Precision(_) => {
                ErrorCategory::Domain
            }
            Error::NonConvergent { .. } => ErrorCategory::Numeric,
            Error::Config(_) => ErrorCategory::Config,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Whether this error is scoped to a single evaluation.
    ///
    /// Per-evaluation failures never abort a sweep; configuration and I/O
    /// failures do.
    pub fn is_evaluation_scoped(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Domain | ErrorCategory::Numeric
        )
    }
}
