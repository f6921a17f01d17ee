//! Typed sweep configuration.
//!
//! A sweep file maps figure names to parameter grids. Each of the three model
//! parameters (`epsilon`, `palpha`, `n_mean`) is given as a scalar, an
//! explicit ordered list, or a generated range; the Cartesian product of the
//! expanded axes defines the figure's grid.
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "defaults": { "digits": 6 },
//!   "figures": {
//!     "entropy_vs_epsilon": {
//!       "quantities": ["h", "h-const"],
//!       "epsilon": { "from": 0.01, "to": 100.0, "points": 30, "log": true },
//!       "palpha": [0.1, 0.5, 0.9],
//!       "n_mean": 50.0
//!     }
//!   }
//! }
//! ```

use crate::validate::{ValidationError, ValidationResult};
use ge_common::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level sweep configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub schema_version: String,
    #[serde(default)]
    pub defaults: Defaults,
    pub figures: BTreeMap<String, FigureSpec>,
}

/// Global defaults applied to every figure that does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Significant digits for evaluation and display.
    #[serde(default = "default_digits")]
    pub digits: u32,
    /// Worker threads for the sweep; defaults to available parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

fn default_digits() -> u32 {
    ge_common::precision::DEFAULT_TARGET_DIGITS
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            digits: default_digits(),
            workers: None,
        }
    }
}

/// One figure's grid: quantities to evaluate and the three parameter axes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureSpec {
    pub quantities: Vec<Quantity>,
    pub epsilon: Axis,
    pub palpha: Axis,
    pub n_mean: Axis,
    /// Per-figure digits override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digits: Option<u32>,
    /// Explicit series truncation override (normally left to the estimator).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<u64>,
}

/// One parameter axis of a grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Axis {
    Scalar(f64),
    List(Vec<f64>),
    Range(RangeAxis),
}

/// Generated axis: `points` values from `from` to `to`, linearly or
/// logarithmically spaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeAxis {
    pub from: f64,
    pub to: f64,
    pub points: usize,
    #[serde(default)]
    pub log: bool,
}

impl Axis {
    /// Expand the axis into its ordered value sequence.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Axis::Scalar(v) => vec![*v],
            Axis::List(vs) => vs.clone(),
            Axis::Range(r) => r.values(),
        }
    }

    /// Number of grid points along this axis.
    pub fn len(&self) -> usize {
        match self {
            Axis::Scalar(_) => 1,
            Axis::List(vs) => vs.len(),
            Axis::Range(r) => r.points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RangeAxis {
    fn values(&self) -> Vec<f64> {
        if self.points == 0 {
            return Vec::new();
        }
        if self.points == 1 {
            return vec![self.from];
        }
        let n = self.points;
        let mut out = Vec::with_capacity(n);
        if self.log {
            let (lo, hi) = (self.from.ln(), self.to.ln());
            let step = (hi - lo) / (n - 1) as f64;
            for i in 0..n {
                out.push((lo + step * i as f64).exp());
            }
        } else {
            let step = (self.to - self.from) / (n - 1) as f64;
            for i in 0..n {
                out.push(self.from + step * i as f64);
            }
        }
        // Endpoints exact regardless of rounding in the interior.
        out[0] = self.from;
        out[n - 1] = self.to;
        out
    }
}

impl SweepConfig {
    /// Load and validate a sweep configuration from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ValidationError::Io(format!("{}: {e}", path.display())))?;
        Self::from_str_validated(&text)
    }

    /// Parse and validate a sweep configuration from a JSON string.
    pub fn from_str_validated(text: &str) -> ValidationResult<Self> {
        let config: SweepConfig =
            serde_json::from_str(text).map_err(|e| ValidationError::Parse(e.to_string()))?;
        crate::validate::validate_config(&config)?;
        Ok(config)
    }

    /// Effective digits for a figure (figure override or global default).
    pub fn digits_for(&self, figure: &FigureSpec) -> u32 {
        figure.digits.unwrap_or(self.defaults.digits)
    }
}
