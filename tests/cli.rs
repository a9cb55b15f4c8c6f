//! End-to-end tests that run the staffdesk binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FALLBACK: &str = "Sorry, I am having trouble connecting to the assistant service.";

fn staffdesk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("staffdesk").unwrap();
    cmd.env("STAFFDESK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("STAFFDESK_LOG")
        .env_remove("GEMINI_API_KEY")
        .current_dir(home.path());
    cmd
}

#[test]
fn test_shell_script_tracks_a_session() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .arg("shell")
        .write_stdin("login jdoe secret1\nstart\nelapsed\nstop\nhistory\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as"))
        .stdout(predicate::str::contains("Clocked in"))
        .stdout(predicate::str::contains("Clocked out"))
        .stdout(predicate::str::contains("History (3)"));
}

#[test]
fn test_shell_reports_double_start_and_keeps_going() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .arg("shell")
        .write_stdin("start\nstart\nstop\nstop\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("already clocked in"))
        .stdout(predicate::str::contains("not clocked in"))
        .stdout(predicate::str::contains("no user is logged in"));
}

#[test]
fn test_shell_status_follows_tracker() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .args(["shell", "--output", "json"])
        .write_stdin("login jdoe secret1\nstatus busy\nstart\nstatus\nstop\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Busy\""))
        .stdout(predicate::str::contains("\"Active\""))
        .stdout(predicate::str::contains("\"Offline\""));
}

#[test]
fn test_shell_settings_validation() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .arg("shell")
        .write_stdin("login jdoe secret1\npassword abc abc\npassword abcdef abcdeg\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Password must be at least 6 characters."))
        .stdout(predicate::str::contains("Passwords do not match."));
}

#[test]
fn test_shell_messages_and_projects() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .arg("shell")
        .write_stdin(
            "login jdoe secret1\n\
             messages contacts sec\n\
             messages send 2 \"standup moved to 10\"\n\
             messages show 2\n\
             projects create-file notes.md\n\
             projects files\n\
             projects approval\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("John Reese"))
        .stdout(predicate::str::contains("standup moved to 10"))
        .stdout(predicate::str::contains("notes.md"))
        .stdout(predicate::str::contains("Approval%20Request"));
}

#[test]
fn test_ask_without_key_prints_fallback() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .args(["ask", "hello", "there"])
        .assert()
        .success()
        .stdout(predicate::str::contains(FALLBACK));
}

#[test]
fn test_config_path_uses_home() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_init_writes_file() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(home.path().join("config.yaml").exists());

    staffdesk(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_bad_config_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "tracker: [1, 2]").unwrap();
    staffdesk(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_config_init_force_replaces_bad_config() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.yaml");
    std::fs::write(&path, "tracker: [1, 2]").unwrap();

    staffdesk(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    staffdesk(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("tick_millis: 1000"));
    staffdesk(&home).args(["config", "show"]).assert().success();
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    staffdesk(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staffdesk"));
}
