//! Stationary distribution of the externally regulated binary gene model.
//!
//! All three mass terms share one kernel (Ramos et al. 2007, 2010):
//!
//! ```text
//!                N^n   (x)_n
//! dist(x, y, n) = --- * ----- * M(x + n, y + n, -N)
//!                 n!   (y)_n
//! ```
//!
//! with (x, y) shifted per term:
//!
//! ```text
//! phi_n   =            dist(eps*pa,     eps,   n)   marginal
//! alpha_n = pa       * dist(1 + eps*pa, 1 + eps, n) joint with ON
//! beta_n  = (1 - pa) * dist(eps*pa,     1 + eps, n) joint with OFF
//! ```
//!
//! Evaluation stays in the natural-log domain until the final exp: the
//! Kummer function is taken at a negative argument only through the
//! transformation in [`ge_math::ln_kummer_m_neg`], so no intermediate
//! alternating series is ever summed. Each mass term is a probability in
//! (0, 1]; the final exp therefore cannot overflow, only underflow to zero
//! for states far out in the tail.

use ge_common::{Error, Parameters, Quantity, Result};
use ge_math::{ln_kummer_m_neg, log_factorial, log_pochhammer};

/// log dist(x, y, n) for the model kernel above.
///
/// Returns NaN if the hypergeometric series fails to produce a finite value;
/// callers surface that as a `NotANumber` outcome, not an error.
fn ln_dist(x: f64, y: f64, n_mean: f64, n: u64) -> f64 {
    let nf = n as f64;
    nf * n_mean.ln() - log_factorial(n) + log_pochhammer(x, n) - log_pochhammer(y, n)
        + ln_kummer_m_neg(x + nf, y + nf, n_mean)
}

/// Marginal probability of finding n gene products.
pub fn phi(params: &Parameters, n: u64) -> f64 {
    let (eps, pa) = (params.epsilon(), params.palpha());
    ln_dist(eps * pa, eps, params.n_mean(), n).exp()
}

/// Joint probability of n gene products and the promoter ON.
///
/// `alpha(n) / palpha` is the conditional distribution given ON.
pub fn alpha(params: &Parameters, n: u64) -> f64 {
    let (eps, pa) = (params.epsilon(), params.palpha());
    pa * ln_dist(1.0 + eps * pa, 1.0 + eps, params.n_mean(), n).exp()
}

/// Joint probability of n gene products and the promoter OFF.
///
/// `beta(n) / (1 - palpha)` is the conditional distribution given OFF.
pub fn beta(params: &Parameters, n: u64) -> f64 {
    let (eps, pa) = (params.epsilon(), params.palpha());
    (1.0 - pa) * ln_dist(eps * pa, 1.0 + eps, params.n_mean(), n).exp()
}

/// Poisson mass with mean N: the constitutive model's distribution.
pub fn poisson(n_mean: f64, n: u64) -> f64 {
    (n as f64 * n_mean.ln() - log_factorial(n) - n_mean).exp()
}

/// Evaluate one mass term selected by quantity.
///
/// Entropy-family quantities are rejected here the same way the entropy
/// dispatcher rejects mass terms; the two surfaces mirror each other.
pub fn mass_term(quantity: Quantity, params: &Parameters, n: u64) -> Result<f64> {
    match quantity {
        Quantity::Phi => Ok(phi(params, n)),
        Quantity::Alpha => Ok(alpha(params, n)),
        Quantity::Beta => Ok(beta(params, n)),
        other => Err(Error::Config(format!(
            "{other} is an entropy-family quantity, not a mass term"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::truncation::truncation_bound;

    fn params() -> Parameters {
        Parameters::new(2.01, 0.5, 50.0).unwrap()
    }

    #[test]
    fn masses_lie_in_unit_interval() {
        let p = params();
        for n in 0..120 {
            for (name, v) in [("phi", phi(&p, n)), ("alpha", alpha(&p, n)), ("beta", beta(&p, n))] {
                assert!((0.0..=1.0).contains(&v), "{name}({n}) = {v}");
            }
        }
    }

    #[test]
    fn phi_matches_reference_values() {
        // f64 reference values for (eps=2.01, pa=0.5, N=50).
        let p = params();
        assert!((phi(&p, 25) - 0.02005510044007044).abs() < 1e-12);
        assert!((phi(&p, 50) - 0.009213101901243918).abs() < 1e-12);
        assert!((alpha(&p, 25) - 0.010427489670256375).abs() < 1e-12);
        assert!((beta(&p, 25) - 0.009627610769814162).abs() < 1e-12);
    }

    #[test]
    fn on_off_decomposition_conserves_marginal() {
        // Law of total probability: alpha_n + beta_n = phi_n.
        for (eps, pa, n_mean) in [(2.01, 0.5, 50.0), (0.1, 0.9, 10.0), (10.0, 0.05, 30.0)] {
            let p = Parameters::new(eps, pa, n_mean).unwrap();
            for n in 0..80 {
                let lhs = alpha(&p, n) + beta(&p, n);
                let rhs = phi(&p, n);
                assert!(
                    (lhs - rhs).abs() <= 1e-12 * rhs.max(1e-300),
                    "n={n} ({eps}, {pa}, {n_mean}): {lhs} vs {rhs}"
                );
            }
        }
    }

    #[test]
    fn phi_tail_mass_reaches_one() {
        let p = params();
        let k = truncation_bound(p.n_mean(), 6);
        let total: f64 = (0..=k).map(|n| phi(&p, n)).sum();
        assert!(total > 1.0 - 1e-2, "sum = {total}");
        assert!(total <= 1.0 + 1e-9, "sum = {total}");
    }

    #[test]
    fn deep_tail_underflows_to_zero_not_nan() {
        let p = Parameters::new(2.01, 0.5, 1.0).unwrap();
        let far = phi(&p, 400);
        assert_eq!(far, 0.0);
    }

    #[test]
    fn mass_term_dispatches_and_rejects_entropy_quantities() {
        let p = params();
        assert_eq!(mass_term(Quantity::Phi, &p, 25).unwrap(), phi(&p, 25));
        assert_eq!(mass_term(Quantity::Beta, &p, 25).unwrap(), beta(&p, 25));
        for q in [Quantity::H, Quantity::I, Quantity::HConstitutive] {
            let err = mass_term(q, &p, 25).unwrap_err();
            assert_eq!(err.category(), ge_common::ErrorCategory::Config, "{q}");
        }
    }

    #[test]
    fn poisson_mass_sums_to_one() {
        let total: f64 = (0..=120).map(|n| poisson(50.0, n)).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
