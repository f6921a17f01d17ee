//! CLI evaluation tests for ge-core.
//!
//! Published reference point throughout: (epsilon, palpha, n_mean) =
//! (2.01, 0.5, 50) at six significant digits.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the ge-core binary.
fn ge_core() -> Command {
    Command::cargo_bin("ge-core").expect("ge-core binary should exist")
}

mod eval {
    use super::*;

    #[test]
    fn marginal_entropy_reference_value() {
        ge_core()
            .args(["eval", "h", "2.01", "0.5", "50"])
            .assert()
            .success()
            .stdout("5.82990e0\n");
    }

    #[test]
    fn conditional_entropy_on_reference_value() {
        ge_core()
            .args(["eval", "h-on", "2.01", "0.5", "50"])
            .assert()
            .success()
            .stdout("5.72502e0\n");
    }

    #[test]
    fn mutual_information_reference_value() {
        ge_core()
            .args(["eval", "i", "2.01", "0.5", "50"])
            .assert()
            .success()
            .stdout("2.45149e-1\n");
    }

    #[test]
    fn digits_control_output_width() {
        ge_core()
            .args(["eval", "h", "2.01", "0.5", "50", "3"])
            .assert()
            .success()
            .stdout("5.83e0\n");
    }

    #[test]
    fn json_report_carries_tuple_and_truncation() {
        let output = ge_core()
            .args(["-f", "json", "eval", "h", "2.01", "0.5", "50"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let report: serde_json::Value =
            serde_json::from_slice(&output).expect("one JSON object on stdout");
        assert_eq!(report["quantity"], "h");
        assert_eq!(report["epsilon"], 2.01);
        assert_eq!(report["palpha"], 0.5);
        assert_eq!(report["n_mean"], 50.0);
        assert_eq!(report["digits"], 6);
        assert_eq!(report["k"], 86);
        assert_eq!(report["formatted"], "5.82990e0");
        let value = report["value"].as_f64().expect("finite value");
        assert!((value - 5.829897684463017).abs() < 1e-9);
    }

    #[test]
    fn non_convergent_series_prints_sentinel_and_succeeds() {
        // A mean far outside the convergent range with a tiny explicit
        // bound exhausts the hypergeometric iteration cap; the result is
        // undefined, not an error.
        ge_core()
            .args(["eval", "h", "2.01", "0.5", "2000000", "6", "5"])
            .assert()
            .success()
            .stdout("NaN\n");
    }

    #[test]
    fn mass_term_quantity_is_redirected_to_dist() {
        ge_core()
            .args(["eval", "phi", "2.01", "0.5", "50"])
            .assert()
            .failure()
            .code(10)
            .stderr(predicate::str::contains("dist"));
    }
}

mod eval_const {
    use super::*;

    #[test]
    fn poisson_entropy_reference_value() {
        ge_core()
            .args(["eval-const", "50"])
            .assert()
            .success()
            .stdout("4.86599e0\n");
    }

    #[test]
    fn zero_mean_is_a_domain_error() {
        ge_core()
            .args(["eval-const", "0"])
            .assert()
            .failure()
            .code(10)
            .stderr(predicate::str::contains("n_mean"));
    }
}

mod dist {
    use super::*;

    #[test]
    fn mass_term_near_the_mean_is_a_probability() {
        let output = ge_core()
            .args(["-f", "json", "dist", "phi", "40", "2.01", "0.5", "50"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let report: serde_json::Value =
            serde_json::from_slice(&output).expect("one JSON object on stdout");
        assert_eq!(report["quantity"], "phi");
        assert_eq!(report["state"], 40);
        let mass = report["value"].as_f64().expect("finite mass");
        assert!(mass > 0.0 && mass < 1.0, "phi(40) = {mass}");
    }

    #[test]
    fn conditional_masses_sum_to_the_marginal() {
        let term_at = |term: &str| -> f64 {
            let output = ge_core()
                .args(["-f", "json", "dist", term, "40", "2.01", "0.5", "50"])
                .assert()
                .success()
                .get_output()
                .stdout
                .clone();
            let report: serde_json::Value =
                serde_json::from_slice(&output).expect("one JSON object on stdout");
            report["value"].as_f64().expect("finite mass")
        };

        let phi = term_at("phi");
        let alpha = term_at("alpha");
        let beta = term_at("beta");
        assert!((alpha + beta - phi).abs() < 1e-12 * phi);
    }

    #[test]
    fn entropy_quantity_is_redirected_to_eval() {
        ge_core()
            .args(["dist", "h", "40", "2.01", "0.5", "50"])
            .assert()
            .failure()
            .code(10)
            .stderr(predicate::str::contains("eval"));
    }
}
