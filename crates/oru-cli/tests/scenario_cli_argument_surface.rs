use assert_cmd::Command;
use predicates::prelude::*;

// These scenarios stop at argument parsing; nothing here needs a database
// or an Oracle client library.

#[test]
fn scenario_cli_reconcile_requires_name() {
    Command::cargo_bin("oru")
        .unwrap()
        .arg("reconcile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn scenario_cli_rejects_unknown_state() {
    Command::cargo_bin("oru")
        .unwrap()
        .args(["reconcile", "--name", "APP_USER", "--state", "dropped"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn scenario_cli_help_lists_both_commands() {
    Command::cargo_bin("oru")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("reconcile").and(predicate::str::contains("plan")));
}

#[test]
fn scenario_cli_plan_accepts_full_desired_state_surface() {
    // Unknown-flag detection happens before any connection attempt, so a
    // parse-level smoke test is a typo guard for the whole flag surface.
    Command::cargo_bin("oru")
        .unwrap()
        .args([
            "plan",
            "--name",
            "APP_USER",
            "--state",
            "locked",
            "--password-hash",
            "6D0F7C1657D2C7D3",
            "--default-tablespace",
            "USERS",
            "--temporary-tablespace",
            "TEMP",
            "--oracle-host",
            "256.0.0.1",
            "--bogus-flag",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus-flag"));
}
