use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sleeptrack(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sleeptrack").unwrap();
    cmd.env("SLEEPTRACK_HOME", home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn start_stop_rate_list() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tracking night #1"));

    sleeptrack(&home)
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already tracking night #1"));

    sleeptrack(&home)
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("Night #1 ended"));

    sleeptrack(&home)
        .args(["rate", "pretty good"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Night #1 rated"));

    sleeptrack(&home)
        .args(["--output", "json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("\"sleep_quality\": 4"));
}

#[test]
fn stop_without_tracking_fails() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home)
        .arg("stop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No night is being tracked"));
}

#[test]
fn rate_open_night_fails() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home).arg("start").assert().success();
    sleeptrack(&home)
        .args(["rate", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still being tracked"));
}

#[test]
fn rate_rejects_out_of_range() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home).args(["rate", "9"]).assert().failure();
}

#[test]
fn status_json_when_idle_is_null() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home)
        .args(["-o", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn clear_requires_force() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home).arg("start").assert().success();
    sleeptrack(&home).arg("stop").assert().success();

    sleeptrack(&home)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"))
        .stderr(predicate::str::contains("Configuration error").not());

    sleeptrack(&home)
        .args(["clear", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 nights."));

    sleeptrack(&home)
        .args(["-o", "json", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[test]
fn completions_print_script() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sleeptrack"));
}

#[test]
fn config_default_output_is_honored() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\n",
    )
    .unwrap();

    sleeptrack(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"items\""));
}

#[test]
fn start_json_flags_already_tracking() {
    let home = TempDir::new().unwrap();

    sleeptrack(&home)
        .args(["-o", "json", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"already_tracking\": false"));

    sleeptrack(&home)
        .args(["-o", "json", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"already_tracking\": true"));
}

#[test]
fn bad_date_format_is_reported_not_panicked() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "display:\n  date_format: '%Q'\n",
    )
    .unwrap();

    sleeptrack(&home)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("date_format"))
        .stderr(predicate::str::contains("panicked").not());
}
