//! End-to-end tests for the `bondcalc` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an isolated config file and plain output.
fn bondcalc(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bondcalc").unwrap();
    cmd.env("BONDCALC_CONFIG", config_dir.path().join("config.json"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

const ONE_YEAR_BOND: [&str; 10] = [
    "--coupon",
    "5",
    "--ytm",
    "6",
    "--maturity",
    "2026-01-18",
    "--valuation-date",
    "2025-01-18",
    "--principal",
    "1000",
];

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// VALUATE
// =============================================================================

#[test]
fn test_valuate_json() {
    let dir = TempDir::new().unwrap();
    let json = json_stdout(
        bondcalc(&dir)
            .args(["--format", "json", "valuate"])
            .args(ONE_YEAR_BOND),
    );

    let dirty = json["dirty_price"].as_f64().unwrap();
    assert!((dirty - 1050.0 / 1.06).abs() < 1e-9);
    assert!((json["clean_price"].as_f64().unwrap() - dirty).abs() < 1e-9);
    assert!((json["modified_duration"].as_f64().unwrap() - 1.0 / 1.06).abs() < 1e-9);
    assert!((json["elasticity"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert_eq!(json["period_count"], 1);
    assert_eq!(json["next_coupon_date"], "2026-01-18");
    assert_eq!(json["bond"]["principal"], 1000.0);
    assert!(json.get("shift").is_none());
}

#[test]
fn test_valuate_minimal_prints_clean_price() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args(["--format", "minimal", "valuate"])
        .args(ONE_YEAR_BOND)
        .assert()
        .success()
        .stdout("990.566038\n");
}

#[test]
fn test_valuate_table() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .arg("valuate")
        .args(ONE_YEAR_BOND)
        .assert()
        .success()
        .stdout(predicate::str::contains("Clean Price"))
        .stdout(predicate::str::contains("Modified Duration"))
        .stdout(predicate::str::contains("DV01"))
        .stdout(predicate::str::contains("990.566038"));
}

#[test]
fn test_valuate_with_shift() {
    let dir = TempDir::new().unwrap();
    let json = json_stdout(
        bondcalc(&dir)
            .args(["--format", "json", "valuate"])
            .args(ONE_YEAR_BOND)
            .args(["--shift-bps", "100"]),
    );

    let shift = &json["shift"];
    assert_eq!(shift["shift_bps"], 100.0);
    let exact = shift["exact_change"].as_f64().unwrap();
    assert!((exact - (1050.0 / 1.07 - 1050.0 / 1.06)).abs() < 1e-9);
    assert!(shift["duration_estimate"].as_f64().unwrap() < 0.0);
}

#[test]
fn test_valuate_rejects_maturity_before_valuation() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args([
            "valuate",
            "--coupon",
            "5",
            "--ytm",
            "6",
            "--maturity",
            "2024-01-18",
            "--valuation-date",
            "2025-01-18",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("maturity_date"));
}

#[test]
fn test_valuate_rejects_bad_inputs() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args([
            "valuate",
            "--principal=-5",
            "--coupon",
            "5",
            "--ytm",
            "6",
            "--maturity",
            "2030-01-18",
            "--valuation-date",
            "2025-01-18",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("principal"));

    bondcalc(&dir)
        .args([
            "valuate",
            "--coupon",
            "5",
            "--ytm",
            "6",
            "--maturity",
            "18/01/2030",
            "--valuation-date",
            "2025-01-18",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_valuate_negative_yield_below_minus_100_percent() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args([
            "valuate",
            "--coupon",
            "5",
            "--ytm",
            "-150",
            "--maturity",
            "2030-01-18",
            "--valuation-date",
            "2025-01-18",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Domain error"));
}

// =============================================================================
// SCHEDULE
// =============================================================================

#[test]
fn test_schedule_csv() {
    let dir = TempDir::new().unwrap();
    let assert = bondcalc(&dir)
        .args([
            "--format",
            "csv",
            "schedule",
            "--coupon",
            "5",
            "--ytm",
            "6",
            "--maturity",
            "2030-01-17",
            "--valuation-date",
            "2025-01-18",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        "period,payment_date,time_offset_years,cash_flow,discount_factor,present_value"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("1,2026-01-18,1.0,50.0,"));
    assert!(lines[5].starts_with("5,2030-01-17,5.0,1050.0,"));
}

#[test]
fn test_schedule_json_matches_valuation() {
    let dir = TempDir::new().unwrap();
    let rows = json_stdout(
        bondcalc(&dir)
            .args(["--format", "json", "schedule"])
            .args(ONE_YEAR_BOND),
    );

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["cash_flow"], 1050.0);
    let pv = rows[0]["present_value"].as_f64().unwrap();
    assert!((pv - 1050.0 / 1.06).abs() < 1e-9);
}

// =============================================================================
// BATCH
// =============================================================================

#[test]
fn test_batch_csv_keeps_failed_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "bonds.csv",
        "principal,coupon_rate,ytm,maturity_date,valuation_date\n\
         1000,5,6,2026-01-18,2025-01-18\n\
         1000,5,6,2024-01-18,2025-01-18\n\
         500,0,4,2027-01-18,\n",
    );

    let assert = bondcalc(&dir)
        .args(["--format", "json", "batch", "--valuation-date", "2025-01-18", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 3 bonds could not be valued"));

    let rows: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);

    assert!((rows[0]["dirty_price"].as_f64().unwrap() - 1050.0 / 1.06).abs() < 1e-9);
    assert!(rows[0]["error"].is_null());

    assert!(rows[1]["clean_price"].is_null());
    assert!(rows[1]["error"].as_str().unwrap().contains("maturity_date"));

    // 730 days at the default valuation date, zero coupon.
    let expected = 500.0 / 1.04_f64.powi(2);
    assert!((rows[2]["dirty_price"].as_f64().unwrap() - expected).abs() < 1e-9);
}

#[test]
fn test_batch_json_minimal() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        dir.path(),
        "bonds.json",
        r#"[
            {"principal": 1000, "coupon_rate": 5, "ytm": 6,
             "maturity_date": "2026-01-18", "valuation_date": "2025-01-18"},
            {"principal": 1000, "coupon_rate": 5, "ytm": 5,
             "maturity_date": "2030-01-17", "valuation_date": "2025-01-18"}
        ]"#,
    );

    bondcalc(&dir)
        .args(["--format", "minimal", "batch", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout("990.566038\n1000.000000\n");
}

#[test]
fn test_batch_missing_file() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args(["batch", "--input"])
        .arg(dir.path().join("absent.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_set_changes_defaults() {
    let dir = TempDir::new().unwrap();

    bondcalc(&dir)
        .args(["config", "set", "default_principal", "100"])
        .assert()
        .success();
    bondcalc(&dir)
        .args(["config", "set", "format", "json"])
        .assert()
        .success();

    bondcalc(&dir)
        .args(["--format", "minimal", "config", "get", "principal"])
        .assert()
        .success()
        .stdout("100\n");

    // No --principal and no --format: both come from the config file.
    let json = json_stdout(bondcalc(&dir).args([
        "valuate",
        "--coupon",
        "5",
        "--ytm",
        "6",
        "--maturity",
        "2026-01-18",
        "--valuation-date",
        "2025-01-18",
    ]));
    assert!((json["dirty_price"].as_f64().unwrap() - 105.0 / 1.06).abs() < 1e-9);

    bondcalc(&dir)
        .args(["config", "reset", "--all"])
        .assert()
        .success();
    bondcalc(&dir)
        .args(["--format", "minimal", "config", "get", "default_principal"])
        .assert()
        .success()
        .stdout("1000\n");
}

#[test]
fn test_config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();

    bondcalc(&dir)
        .args(["config", "set", "decimal_precision", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("decimal_precision"));

    bondcalc(&dir)
        .args(["config", "get", "currency"])
        .assert()
        .failure();

    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn test_config_path_honours_env() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("not created yet"));
}

#[test]
fn test_precision_setting() {
    let dir = TempDir::new().unwrap();
    bondcalc(&dir)
        .args(["config", "set", "precision", "2"])
        .assert()
        .success();

    bondcalc(&dir)
        .args(["--format", "minimal", "valuate"])
        .args(ONE_YEAR_BOND)
        .assert()
        .success()
        .stdout("990.57\n");
}

#[test]
fn test_hand_edited_numeric_config() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "config.json", r#"{"decimal_precision": 4}"#);

    bondcalc(&dir)
        .args(["--format", "minimal", "valuate"])
        .args(ONE_YEAR_BOND)
        .assert()
        .success()
        .stdout("990.5660\n");

    bondcalc(&dir)
        .args(["config", "reset", "--all"])
        .assert()
        .success();
    bondcalc(&dir)
        .args(["--format", "minimal", "config", "get", "precision"])
        .assert()
        .success()
        .stdout("6\n");
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "config.json", "not json");

    bondcalc(&dir)
        .args(["--format", "minimal", "valuate"])
        .args(ONE_YEAR_BOND)
        .assert()
        .success()
        .stdout("990.566038\n")
        .stderr(predicate::str::contains("Ignoring unreadable configuration"));

    bondcalc(&dir)
        .args(["config", "reset", "--all"])
        .assert()
        .success();
    let repaired = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert_eq!(serde_json::from_str::<serde_json::Value>(&repaired).unwrap(), serde_json::json!({}));
}
