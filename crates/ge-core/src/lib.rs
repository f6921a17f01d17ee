//! Gene-entropy core library.
//!
//! Numeric engine for the externally regulated two-state stochastic
//! gene-expression model:
//! - Stationary-distribution mass terms (phi, alpha, beta)
//! - Truncation-bound estimation from the distribution tail
//! - Entropy series summation (H, H_ON, H_OFF) and derived mutual information
//! - Significant-figure result formatting
//! - Parameter-sweep orchestration with worker fan-out and result caching
//!
//! The binary entry point is in `main.rs`.

pub mod dist;
pub mod entropy;
pub mod exit_codes;
pub mod format;
pub mod logging;
pub mod sweep;
pub mod truncation;
