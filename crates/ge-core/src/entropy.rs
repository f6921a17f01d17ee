//! Entropy series summation and the derived information quantities.
//!
//! Every entropy is a truncated series `sum_n -q_n * log2(q_n)` over a
//! (conditional) probability distribution `q_n` derived from the mass terms
//! in [`crate::dist`]. The summation contract:
//!
//! - Terms with numerically zero mass contribute nothing (`0*log 0 := 0`,
//!   the information-theoretic limit).
//! - A single non-finite or negative term makes the whole result
//!   `NotANumber`; a silently truncated sum would be a wrong entropy, an
//!   explicit undefined is not.
//! - Accumulation is compensated, so millions of tail terms cannot erode the
//!   leading digits.

use crate::dist;
use crate::truncation::resolve_bound;
use ge_common::{Error, EvalResult, Parameters, PrecisionSpec, Quantity, Result};
use ge_math::{log_factorial, CompensatedSum};
use std::f64::consts::{E, LN_2};
use tracing::debug;

/// Sum `-q log2 q` for `q = term(n)/normalizer`, n = 0..=k.
fn entropy_series<F>(k: u64, normalizer: f64, term: F) -> EvalResult
where
    F: Fn(u64) -> f64,
{
    let mut acc = CompensatedSum::new();
    for n in 0..=k {
        let t = term(n);
        if !t.is_finite() || t < 0.0 {
            debug!(n, term = t, "series term not a finite probability");
            return EvalResult::NotANumber;
        }
        if t == 0.0 {
            continue;
        }
        let q = t / normalizer;
        acc.add(-q * q.log2());
    }
    EvalResult::from_value(acc.total())
}

/// Shannon entropy H of the marginal product-number distribution.
pub fn entropy_marginal(params: &Parameters, spec: &PrecisionSpec) -> EvalResult {
    let k = resolve_bound(params, spec);
    entropy_series(k, 1.0, |n| dist::phi(params, n))
}

/// Entropy H_ON of the distribution conditional on the promoter being ON.
pub fn entropy_on(params: &Parameters, spec: &PrecisionSpec) -> EvalResult {
    let k = resolve_bound(params, spec);
    entropy_series(k, params.palpha(), |n| dist::alpha(params, n))
}

/// Entropy H_OFF of the distribution conditional on the promoter being OFF.
pub fn entropy_off(params: &Parameters, spec: &PrecisionSpec) -> EvalResult {
    let k = resolve_bound(params, spec);
    entropy_series(k, 1.0 - params.palpha(), |n| dist::beta(params, n))
}

/// Mutual information between product number and promoter state:
///
/// ```text
/// I(X; Y) = H(X) - H(X|Y) = H - (pa*H_ON + (1-pa)*H_OFF)
/// ```
///
/// Not itself a series: derived from three independent evaluations, any of
/// which being undefined makes I undefined.
pub fn mutual_information(params: &Parameters, spec: &PrecisionSpec) -> EvalResult {
    let h = entropy_marginal(params, spec);
    let h_on = entropy_on(params, spec);
    let h_off = entropy_off(params, spec);
    match (h.as_f64(), h_on.as_f64(), h_off.as_f64()) {
        (Some(h), Some(h_on), Some(h_off)) => {
            let pa = params.palpha();
            EvalResult::from_value(h - pa * h_on - (1.0 - pa) * h_off)
        }
        _ => EvalResult::NotANumber,
    }
}

/// Shannon entropy of the constitutive (Poisson) gene model:
///
/// ```text
/// H_const = -N*log2(N/e) + sum_n N^n/n! * e^-N * log2(n!)
/// ```
pub fn entropy_constitutive(n_mean: f64, spec: &PrecisionSpec) -> Result<EvalResult> {
    if !n_mean.is_finite() || n_mean <= 0.0 {
        return Err(Error::DomainValue {
            param: "n_mean".to_string(),
            value: n_mean,
            reason: "must be finite and positive".to_string(),
        });
    }
    let k = spec
        .explicit_k()
        .unwrap_or_else(|| crate::truncation::truncation_bound(n_mean, spec.digits()));

    let mut acc = CompensatedSum::new();
    acc.add(-n_mean * (n_mean / E).log2());
    for n in 0..=k {
        let mass = dist::poisson(n_mean, n);
        if mass == 0.0 {
            continue;
        }
        if !mass.is_finite() {
            return Ok(EvalResult::NotANumber);
        }
        acc.add(mass * (log_factorial(n) / LN_2));
    }
    Ok(EvalResult::from_value(acc.total()))
}

/// Evaluate one entropy-family quantity for a parameter tuple.
pub fn evaluate(quantity: Quantity, params: &Parameters, spec: &PrecisionSpec) -> Result<EvalResult> {
    let result = match quantity {
        Quantity::H => entropy_marginal(params, spec),
        Quantity::HOn => entropy_on(params, spec),
        Quantity::HOff => entropy_off(params, spec),
        Quantity::I => mutual_information(params, spec),
        Quantity::HConstitutive => entropy_constitutive(params.n_mean(), spec)?,
        Quantity::Phi | Quantity::Alpha | Quantity::Beta => {
            return Err(Error::Config(format!(
                "{quantity} takes a state index; use the mass-term surface"
            )))
        }
    };
    Ok(result)
}
