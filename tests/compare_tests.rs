//! End-to-end tests of the comparison reports

use predicates::prelude::*;
use std::fs;

mod common;
use common::{bin, fixtures};

fn with_total(bytes: u64) -> serde_json::Value {
    let mut snapshot = fixtures::minimal_snapshot();
    snapshot["image_details"]["total_bytes"] = serde_json::json!(bytes);
    snapshot
}

#[test]
fn test_total_size_regression_is_flagged() {
    let (_dir, current, baseline) =
        fixtures::write_pair(with_total(1_100_000), with_total(1_000_000)).unwrap();

    let output = bin()
        .arg("compare")
        .arg(&current)
        .arg(&baseline)
        .env("GITHUB_BASE_REF", "main")
        .output()
        .unwrap();
    assert!(output.status.success());

    let markup = String::from_utf8(output.stdout).unwrap();
    assert!(markup.contains("Compared to <code>main</code>."));
    assert!(markup.contains("+10.000% 🔴 (+97.66KB)"));
    assert!(!markup.contains("NaN"));

    let summary = String::from_utf8(output.stderr).unwrap();
    assert!(summary.contains("regressed"));
}

#[test]
fn test_identical_builds_are_neutral() {
    let (_dir, current, baseline) =
        fixtures::write_pair(fixtures::minimal_snapshot(), fixtures::minimal_snapshot()).unwrap();

    bin()
        .arg("compare")
        .arg(&current)
        .arg(&baseline)
        .assert()
        .success()
        .stdout(predicate::str::contains("🔴").not())
        .stdout(predicate::str::contains("🟢").not())
        .stderr(predicate::str::contains("0 improved, 0 regressed"));
}

#[test]
fn test_upper_bound_flag_relaxes_classification() {
    let (_dir, current, baseline) =
        fixtures::write_pair(with_total(1_100_000), with_total(1_000_000)).unwrap();

    bin()
        .arg("compare")
        .arg(&current)
        .arg(&baseline)
        .args(["--upper-bound", "150"])
        .assert()
        .success()
        .stdout(predicate::str::contains("🔴").not());
}

#[test]
fn test_chart_style_renders_mermaid() {
    let (_dir, current, baseline) =
        fixtures::write_pair(fixtures::full_snapshot(), fixtures::full_snapshot()).unwrap();

    bin()
        .arg("compare")
        .arg(&current)
        .arg(&baseline)
        .args(["--style", "chart", "--charts", "Image Details, Resource Usage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("```mermaid"))
        .stdout(predicate::str::contains("#### Image Details"))
        .stdout(predicate::str::contains("#### Analysis Results").not())
        .stdout(predicate::str::contains("<table>").not());
}

#[test]
fn test_config_file_selects_charts() {
    let (dir, current, baseline) =
        fixtures::write_pair(fixtures::minimal_snapshot(), fixtures::minimal_snapshot()).unwrap();
    fs::write(
        dir.path().join(".native-image-report.toml"),
        "[charts]\ncategories = \"analysis results\"\n",
    )
    .unwrap();

    let output = bin()
        .current_dir(dir.path())
        .arg("compare")
        .arg(&current)
        .arg(&baseline)
        .output()
        .unwrap();
    assert!(output.status.success());

    let markup = String::from_utf8(output.stdout).unwrap();
    assert_eq!(markup.matches("```mermaid").count(), 1);
    assert!(markup.contains("section Methods"));
    assert!(markup.contains("#### Image Details\n\n<table>"));
}

#[test]
fn test_json_summary_lists_regressions() {
    let (_dir, current, baseline) =
        fixtures::write_pair(with_total(1_100_000), with_total(1_000_000)).unwrap();

    let output = bin()
        .arg("compare")
        .arg(&current)
        .arg(&baseline)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    let total = value["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["key"] == "image.total")
        .unwrap();
    assert_eq!(total["comparison"]["verdict"], "regressed");
}

#[test]
fn test_missing_current_snapshot_is_skipped() {
    let (dir, _current, baseline) =
        fixtures::write_pair(fixtures::minimal_snapshot(), fixtures::minimal_snapshot()).unwrap();

    bin()
        .arg("compare")
        .arg(dir.path().join("missing.json"))
        .arg(&baseline)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
