//! End-to-end tests for the factory-monitor binary

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn monitor() -> Command {
    Command::cargo_bin("factory-monitor").unwrap()
}

#[test]
fn bottleneck_view_flags_default_floor() {
    monitor()
        .arg("bottleneck")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operator Bottleneck Detected"))
        .stdout(predicate::str::contains("Process Bottleneck Detected"))
        .stdout(predicate::str::contains("No. of Outputs Produced: 1309 units"));
}

#[test]
fn energy_view_uses_currency_override() {
    monitor()
        .args(["--currency", "$", "energy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cost: $160.00"))
        .stdout(predicate::str::contains("High Cost Alert"));
}

#[test]
fn energy_edit_changes_cost() {
    let output = monitor()
        .args(["energy", "--set", "M1.power=5", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let metrics: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(metrics[0]["energy"], 40.0);
    assert_eq!(metrics[0]["cost"], 320.0);
    assert_eq!(metrics[0]["is_high_cost"], true);
}

#[test]
fn non_numeric_edit_fails() {
    monitor()
        .args(["bottleneck", "--set", "M1.ideal=fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a number"));
}

#[test]
fn edit_outside_view_fails() {
    monitor()
        .args(["energy", "--set", "M1.manual=3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be edited from the energy view"));
}

#[test]
fn zero_cycle_time_fails() {
    monitor()
        .args(["bottleneck", "--set", "M4.ideal=0", "--set", "M4.manual=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ideal_machine_time for machine M4"));
}

#[test]
fn wrong_credentials_fail() {
    monitor()
        .args(["--password", "nope", "chart"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));
}

#[test]
fn chart_json_has_parallel_series() {
    let output = monitor().args(["chart", "--json"]).output().unwrap();
    assert!(output.status.success());

    let series: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(series["labels"].as_array().unwrap().len(), 5);
    assert_eq!(series["output"].as_array().unwrap().len(), 5);
    assert_eq!(series["energy"][0], 20.0);
}

#[test]
fn report_prints_week_and_reset_notice() {
    monitor()
        .args(["report", "--simulate", "15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 7"))
        .stdout(predicate::str::contains("Week completed!"));
}

#[test]
fn report_without_waiting_has_no_notice() {
    monitor()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Week completed!").not());
}

#[test]
fn config_file_replaces_machines() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[pipeline]
electricity_rate = 10.0

[[machines]]
id = "P1"
name = "Press"
ideal_machine_time = 30.0
manual_load_time = 10.0
run_time = 8.0
power = 5.0
"#
    )
    .unwrap();

    monitor()
        .arg("--config")
        .arg(file.path())
        .arg("energy")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Press ==="))
        .stdout(predicate::str::contains("Cost: ₹400.00"));
}

#[test]
fn invalid_config_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[pipeline]\nmanual_time_threshold = -1.0").unwrap();

    monitor()
        .arg("--config")
        .arg(file.path())
        .arg("machines")
        .assert()
        .failure()
        .stderr(predicate::str::contains("manual_time_threshold"));
}
