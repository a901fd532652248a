use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn befsh() -> Command {
    let mut cmd = Command::cargo_bin("befsh").expect("befsh binary");
    cmd.timeout(Duration::from_secs(2));
    cmd
}

#[test]
fn characters_push_their_codes_until_the_delimiter() {
    befsh()
        .write_stdin("\"\na\nb\n\"\nshow_stack\nquit\n")
        .assert()
        .success()
        .stdout("[97, 98]\n");
}

#[test]
fn digits_in_string_mode_are_characters() {
    befsh()
        .write_stdin("\"\n5\n\"\n.\nquit\n")
        .assert()
        .success()
        .stdout("53\n");
}

#[test]
fn multi_character_lines_are_rejected() {
    befsh()
        .write_stdin("\"\nhello\n\"\nshow_stack\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Error: string mode takes a single character per line")
                .and(predicate::str::contains("[]")),
        );
}

#[test]
fn commands_are_characters_inside_string_mode() {
    // '+' is pushed as 43, not executed.
    befsh()
        .write_stdin("\"\n+\n\"\nshow_stack\nquit\n")
        .assert()
        .success()
        .stdout("[43]\n");
}
