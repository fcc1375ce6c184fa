use crate::{write_rocket_launcher, ROCKET_LAUNCHER_VARIABLES};
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_cli_show_rule_base() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("show").arg("--dir").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("variables (3):"))
        .stdout(predicate::str::contains("distance [0, 1000]"))
        .stdout(predicate::str::contains("right_shoulder(150, 300, 1000)"))
        .stdout(predicate::str::contains("rules (9):"))
        .stdout(predicate::str::contains(
            "  1. IF distance.far AND ammo.loads THEN desirability.desirable",
        ));
}

#[test]
fn test_cli_check_summary() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("check").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Rule base contains 2 files, 3 variables, 9 sets, 9 rules",
        ))
        .stdout(predicate::str::contains("inputs: distance, ammo"))
        .stdout(predicate::str::contains("outputs: desirability"));
}

#[test]
fn test_cli_check_reports_unknown_term() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("rules.fuzzy"),
        format!(
            "{}\nrule IF distance.near THEN desirability.desirable\n",
            ROCKET_LAUNCHER_VARIABLES
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("check").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown term 'near'"))
        .stderr(predicate::str::contains("close, medium, far"));
}

#[test]
fn test_cli_check_duplicate_variable_across_files() {
    let temp_dir = TempDir::new().unwrap();
    write_rocket_launcher(temp_dir.path());
    fs::write(
        temp_dir.path().join("c_extra.fuzzy"),
        "variable ammo { none = singleton(0) }\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("check").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate variable name 'ammo'"));
}
