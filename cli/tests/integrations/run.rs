use crate::write_rocket_launcher;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_run_prints_results_table() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run")
        .arg("distance=200")
        .arg("ammo=8")
        .arg("--method")
        .arg("mean-of-maxima")
        .arg("--dir")
        .arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("desirability"))
        .stdout(predicate::str::contains("87.5"))
        .stdout(predicate::str::contains("very_desirable: 0.6667"));
}

#[test]
fn test_cli_run_raw() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run")
        .arg("distance=10")
        .arg("ammo=35")
        .arg("-m")
        .arg("mom")
        .arg("--raw")
        .arg("-d")
        .arg(temp_dir.path());

    cmd.assert().success().stdout("12.5\n");
}

#[test]
fn test_cli_run_json_with_trace() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    let output = cmd
        .arg("run")
        .arg("distance=200")
        .arg("ammo=8")
        .arg("-m")
        .arg("mean-of-maxima")
        .arg("--json")
        .arg("--trace")
        .arg("-d")
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["outputs"][0]["variable"], "desirability");
    assert_eq!(json["outputs"][0]["value"], 87.5);
    assert_eq!(json["trace"].as_array().unwrap().len(), 4);
    assert_eq!(
        json["trace"][0]["rule"],
        "IF distance.far AND ammo.okay THEN desirability.undesirable"
    );
}

#[test]
fn test_cli_run_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("heater.fuzzy");
    fs::write(
        &file,
        r#"
variable temperature {
    cold = left_shoulder(0, 10, 20)
    hot  = right_shoulder(10, 20, 30)
}
variable heater {
    off = singleton(0)
    on  = singleton(100)
}
rule IF temperature.cold THEN heater.on
rule IF temperature.hot THEN heater.off
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run")
        .arg("temperature=15")
        .arg("-o")
        .arg("heater")
        .arg("-m")
        .arg("weighted-average")
        .arg("--raw")
        .arg("-d")
        .arg(&file);

    cmd.assert().success().stdout("50\n");
}

#[test]
fn test_cli_run_idle_output_fails_unless_midpoint() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run").arg("--raw").arg("-d").arg(temp_dir.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No active sets"));

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run")
        .arg("--raw")
        .arg("--midpoint")
        .arg("-d")
        .arg(temp_dir.path());
    cmd.assert().success().stdout("50\n");
}

#[test]
fn test_cli_run_rejects_malformed_input() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run").arg("distance").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn test_cli_run_unknown_method() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run")
        .arg("-m")
        .arg("median")
        .arg("-d")
        .arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown defuzzification method"));
}

#[test]
fn test_cli_parse_error_handling() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("broken.fuzzy"),
        r#"
variable distance {
    close = left_shoulder(0, 25, 150
}
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parse error"))
        .stderr(predicate::str::contains("broken.fuzzy"));
}

#[test]
fn test_cli_run_empty_workspace() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("run").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No .fuzzy files found"));
}
