use assert_cmd::Command;

#[test]
fn test_server_command_available() {
    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("server"));
}

#[test]
fn test_server_fails_without_rule_base() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("fuzzy").unwrap();
    cmd.arg("server").arg("-d").arg(temp_dir.path());

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("No .fuzzy files found"));
}
