use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn befsh() -> Command {
    let mut cmd = Command::cargo_bin("befsh").expect("befsh binary");
    cmd.timeout(Duration::from_secs(2));
    cmd.env_remove("BEFSH_MODE");
    cmd
}

#[test]
fn piped_stdin_auto_selects_bare_mode() {
    befsh()
        .write_stdin("5\n.\nquit\n")
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn forced_editor_on_non_tty_errors() {
    befsh()
        .arg("--editor")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn env_can_force_bare_mode() {
    befsh()
        .env("BEFSH_MODE", "bare")
        .write_stdin("5\n.\nquit\n")
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn env_can_force_editor_mode_but_needs_a_tty() {
    befsh()
        .env("BEFSH_MODE", "editor")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stdin is not a TTY"));
}

#[test]
fn invalid_mode_env_value_is_rejected() {
    befsh()
        .env("BEFSH_MODE", "fancy")
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid BEFSH_MODE value"));
}

#[test]
fn bare_flag_overrides_editor_env() {
    befsh()
        .arg("--bare")
        .env("BEFSH_MODE", "editor")
        .write_stdin("5\n.\nquit\n")
        .assert()
        .success()
        .stdout("5\n");
}
