//! Precision and truncation specification for series evaluation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default target precision (significant digits) for the truncation bound.
pub const DEFAULT_TARGET_DIGITS: u32 = 6;

/// Largest honest significant-figure count for f64 evaluation.
///
/// The engine works in the natural-log domain over f64 (~15-16 significant
/// digits); beyond 12 requested digits the result would claim precision the
/// arithmetic cannot deliver, so such specs are rejected up front.
pub const MAX_DIGITS: u32 = 12;

/// How precisely to evaluate and display a quantity, and optionally where to
/// truncate its series.
///
/// `digits` is both the display precision and the accuracy the truncation
/// bound aims for; `k`, when set, overrides the estimator entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionSpec {
    digits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    k: Option<u64>,
}

impl PrecisionSpec {
    pub fn new(digits: u32) -> Result<Self> {
        if digits == 0 || digits > MAX_DIGITS {
            return Err(Error::Precision(format!(
                "digits must be between 1 and {MAX_DIGITS}, got {digits}"
            )));
        }
        Ok(Self { digits, k: None })
    }

    /// Same as `new` but with an explicit series truncation bound.
    pub fn with_truncation(digits: u32, k: u64) -> Result<Self> {
        let mut spec = Self::new(digits)?;
        spec.k = Some(k);
        Ok(spec)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Explicit truncation bound, if the caller supplied one.
    pub fn explicit_k(&self) -> Option<u64> {
        self.k
    }
}

impl Default for PrecisionSpec {
    fn default() -> Self {
        Self {
            digits: DEFAULT_TARGET_DIGITS,
            k: None,
        }
    }
}
