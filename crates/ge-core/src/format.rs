//! Result formatting: fixed significant-figure scientific notation.
//!
//! Downstream consumers (plotting, caching, shell pipelines) get a stable
//! textual contract independent of the working precision used internally.

use ge_common::EvalResult;

/// Sentinel literal for undefined results.
pub const NAN_SENTINEL: &str = "NaN";

/// Render `value` with exactly `digits` significant figures in scientific
/// notation, e.g. `format_significant(5.8298976..., 6)` -> `"5.82990e0"`.
///
/// Non-finite inputs render as the sentinel.
pub fn format_significant(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return NAN_SENTINEL.to_string();
    }
    let frac = digits.saturating_sub(1) as usize;
    format!("{value:.frac$e}")
}

/// Render an evaluation result per the formatting contract.
pub fn format_result(result: EvalResult, digits: u32) -> String {
    match result.as_f64() {
        Some(v) => format_significant(v, digits),
        None => NAN_SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_significant_figures() {
        assert_eq!(format_significant(5.829897684463017, 6), "5.82990e0");
        assert_eq!(format_significant(0.245149001683156, 6), "2.45149e-1");
        assert_eq!(format_significant(4.865992298997446, 6), "4.86599e0");
    }

    #[test]
    fn digit_count_is_exact() {
        assert_eq!(format_significant(1.0 / 3.0, 1), "3e-1");
        assert_eq!(format_significant(1.0 / 3.0, 3), "3.33e-1");
        assert_eq!(format_significant(1.0 / 3.0, 10), "3.333333333e-1");
    }

    #[test]
    fn rounding_at_the_last_digit() {
        assert_eq!(format_significant(0.999_999_9, 6), "1.00000e0");
        assert_eq!(format_significant(123_456.0, 3), "1.23e5");
    }

    #[test]
    fn zero_and_negatives() {
        assert_eq!(format_significant(0.0, 4), "0.000e0");
        assert_eq!(format_significant(-5.5, 2), "-5.5e0");
    }

    #[test]
    fn non_finite_is_the_sentinel() {
        assert_eq!(format_significant(f64::NAN, 6), "NaN");
        assert_eq!(format_significant(f64::INFINITY, 6), "NaN");
        assert_eq!(format_result(EvalResult::NotANumber, 6), "NaN");
        assert_eq!(format_result(EvalResult::Finite(1.5), 2), "1.5e0");
    }
}
