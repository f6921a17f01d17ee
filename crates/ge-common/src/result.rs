//! Evaluation results with an explicit undefined outcome.

use serde::{Deserialize, Serialize};

/// Outcome of one engine evaluation.
///
/// `NotANumber` is a legitimate result, not an error: the quantity is
/// undefined (or not representable as a finite real) at the requested
/// parameters. It serializes as JSON `null`, matching the cache convention
/// that undefined results are stored, so they are not recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum EvalResult {
    Finite(f64),
    NotANumber,
}

impl EvalResult {
    /// Classify a raw f64: any non-finite value collapses to `NotANumber`.
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            EvalResult::Finite(value)
        } else {
            EvalResult::NotANumber
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, EvalResult::NotANumber)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            EvalResult::Finite(v) => Some(*v),
            EvalResult::NotANumber => None,
        }
    }
}

impl From<f64> for EvalResult {
    fn from(value: f64) -> Self {
        EvalResult::from_value(value)
    }
}

impl From<Option<f64>> for EvalResult {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => EvalResult::from_value(v),
            None => EvalResult::NotANumber,
        }
    }
}

impl From<EvalResult> for Option<f64> {
    fn from(result: EvalResult) -> Self {
        result.as_f64()
    }
}
