//! Series truncation bound from the distribution's tail behavior.

use ge_common::{Parameters, PrecisionSpec};

/// Upper summation bound for the entropy series.
///
/// The cumulative distribution of `phi_n` is bounded above by a Poisson
/// cumulative with mean N at the upper tail, and empirically each additional
/// two standard deviations (2*sqrt(N)) past the mean buys about two more
/// correct decimal digits of proximity to 1. Hence
///
/// ```text
/// k = floor(N) + ceil((2 + digits/2) * sqrt(N))
/// ```
///
/// This is a heuristic tail bound, not a proof. It is calibrated for N from
/// about 1 to 10^4; outside that range the series still converges for larger
/// k, but no digit guarantee is claimed.
pub fn truncation_bound(n_mean: f64, digits: u32) -> u64 {
    let margin = (2.0 + digits as f64 / 2.0) * n_mean.sqrt();
    n_mean.floor() as u64 + margin.ceil() as u64
}

/// Resolve the bound for one evaluation: an explicit k wins over the
/// estimator.
pub fn resolve_bound(params: &Parameters, spec: &PrecisionSpec) -> u64 {
    spec.explicit_k()
        .unwrap_or_else(|| truncation_bound(params.n_mean(), spec.digits()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_policy_formula() {
        // N = 50, digits = 6: 50 + ceil(5 * sqrt(50)) = 50 + 36 = 86
        assert_eq!(truncation_bound(50.0, 6), 86);
        // N = 1, digits = 6: 1 + ceil(5) = 6
        assert_eq!(truncation_bound(1.0, 6), 6);
        // N = 100, digits = 2: 100 + ceil(3 * 10) = 130
        assert_eq!(truncation_bound(100.0, 2), 130);
    }

    #[test]
    fn grows_with_requested_digits() {
        let n = 200.0;
        let mut last = 0;
        for digits in 1..=12 {
            let k = truncation_bound(n, digits);
            assert!(k >= last);
            last = k;
        }
    }

    #[test]
    fn explicit_k_overrides_estimator() {
        let p = Parameters::new(2.01, 0.5, 50.0).unwrap();
        let spec = PrecisionSpec::with_truncation(6, 40).unwrap();
        assert_eq!(resolve_bound(&p, &spec), 40);

        let auto = PrecisionSpec::new(6).unwrap();
        assert_eq!(resolve_bound(&p, &auto), 86);
    }
}
