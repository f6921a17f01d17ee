//! Sweep subcommand tests: JSONL record shape, figure filtering,
//! configuration failures, and data-file emission.

use assert_cmd::Command;
use predicates::prelude::*;
use std::collections::HashSet;
use std::path::Path;

/// Get a Command for the ge-core binary.
fn ge_core() -> Command {
    Command::cargo_bin("ge-core").expect("ge-core binary should exist")
}

fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("sweeps.json");
    std::fs::write(&path, body).expect("write config fixture");
    path
}

const SMALL_SWEEP: &str = r#"{
  "schema_version": "1.0.0",
  "defaults": { "digits": 4, "workers": 2 },
  "figures": {
    "demo": {
      "quantities": ["h", "i"],
      "epsilon": [1.0, 2.01],
      "palpha": 0.5,
      "n_mean": [30.0, 50.0]
    }
  }
}"#;

mod jsonl_output {
    use super::*;

    #[test]
    fn emits_one_record_per_grid_point_and_quantity() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), SMALL_SWEEP);

        let output = ge_core()
            .args(["sweep", "--no-cache"])
            .arg(&config)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let stdout = String::from_utf8(output).expect("utf-8 stdout");
        let records: Vec<serde_json::Value> = stdout
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is a JSON record"))
            .collect();

        // 2 quantities x 2 epsilon x 1 palpha x 2 n_mean
        assert_eq!(records.len(), 8);

        let mut seen = HashSet::new();
        for record in &records {
            assert_eq!(record["figure"], "demo");
            assert_eq!(record["digits"], 4);
            assert_eq!(record["palpha"], 0.5);
            let value = record["value"].as_f64().expect("finite entropy value");
            assert!(value > 0.0);
            let key = format!(
                "{}:{}:{}",
                record["quantity"], record["epsilon"], record["n_mean"]
            );
            assert!(seen.insert(key), "duplicate record: {record}");
        }
    }

    #[test]
    fn records_match_single_evaluations() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), SMALL_SWEEP);

        let output = ge_core()
            .args(["sweep", "--no-cache"])
            .arg(&config)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let stdout = String::from_utf8(output).expect("utf-8 stdout");
        let record = stdout
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).expect("JSON record"))
            .find(|r| r["quantity"] == "h" && r["epsilon"] == 2.01 && r["n_mean"] == 50.0)
            .expect("reference grid point present");

        // Same tuple through `eval` at the sweep's digits.
        let single = ge_core()
            .args(["-f", "json", "eval", "h", "2.01", "0.5", "50", "4"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let single: serde_json::Value = serde_json::from_slice(&single).expect("JSON report");

        assert_eq!(record["value"], single["value"]);
        assert_eq!(record["k"], single["k"]);
    }
}

mod figure_filter {
    use super::*;

    #[test]
    fn selects_only_the_named_figure() {
        let two_figures = r#"{
          "schema_version": "1.0.0",
          "figures": {
            "first": {
              "quantities": ["h"],
              "epsilon": 2.01, "palpha": 0.5, "n_mean": [10.0, 20.0]
            },
            "second": {
              "quantities": ["h"],
              "epsilon": 2.01, "palpha": 0.5, "n_mean": 30.0
            }
          }
        }"#;
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), two_figures);

        let output = ge_core()
            .args(["sweep", "--no-cache", "--figure", "second"])
            .arg(&config)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let stdout = String::from_utf8(output).expect("utf-8 stdout");
        let records: Vec<serde_json::Value> = stdout
            .lines()
            .map(|line| serde_json::from_str(line).expect("JSON record"))
            .collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["figure"], "second");
    }

    #[test]
    fn unknown_figure_exits_30() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), SMALL_SWEEP);

        ge_core()
            .args(["sweep", "--no-cache", "--figure", "nope"])
            .arg(&config)
            .assert()
            .failure()
            .code(30)
            .stderr(predicate::str::contains("nope"));
    }
}

mod config_failures {
    use super::*;

    #[test]
    fn missing_file_exits_30() {
        ge_core()
            .args(["sweep", "--no-cache", "/nonexistent/sweeps.json"])
            .assert()
            .failure()
            .code(30);
    }

    #[test]
    fn out_of_range_digits_exit_30() {
        let bad = r#"{
          "schema_version": "1.0.0",
          "defaults": { "digits": 20 },
          "figures": {
            "demo": {
              "quantities": ["h"],
              "epsilon": 2.01, "palpha": 0.5, "n_mean": 50.0
            }
          }
        }"#;
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), bad);

        ge_core()
            .args(["sweep", "--no-cache"])
            .arg(&config)
            .assert()
            .failure()
            .code(30)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn mass_term_quantity_in_sweep_exits_30() {
        let bad = r#"{
          "schema_version": "1.0.0",
          "figures": {
            "demo": {
              "quantities": ["phi"],
              "epsilon": 2.01, "palpha": 0.5, "n_mean": 50.0
            }
          }
        }"#;
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), bad);

        ge_core()
            .args(["sweep", "--no-cache"])
            .arg(&config)
            .assert()
            .failure()
            .code(30);
    }
}

mod data_files {
    use super::*;

    #[test]
    fn writes_one_file_per_curve() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(dir.path(), SMALL_SWEEP);
        let data_dir = dir.path().join("out");

        ge_core()
            .args(["sweep", "--no-cache"])
            .arg(&config)
            .arg("--data-dir")
            .arg(&data_dir)
            .assert()
            .success();

        let mut files: Vec<_> = std::fs::read_dir(&data_dir)
            .expect("data dir created")
            .map(|entry| entry.expect("dir entry").path())
            .collect();
        files.sort();

        // x axis is n_mean (two points); one file per (quantity, epsilon).
        assert_eq!(files.len(), 4);
        for path in &files {
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some("data"));
            let body = std::fs::read_to_string(path).expect("readable data file");
            let mut lines = body.lines();
            let header = lines.next().expect("header line");
            assert!(header.starts_with("# n_mean\t"), "header: {header}");
            assert_eq!(lines.count(), 2);
        }
    }
}
