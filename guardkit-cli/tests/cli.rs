use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("guardkit-cli").unwrap()
}

#[test]
fn demo_options_hit_the_configuration_error() {
    cmd()
        .arg("--skip-type-check")
        .write_stdin("abc\n")
        .assert()
        .failure()
        .stdout(contains("Incorrect argument specification"))
        .stdout(contains("max_retries"));
}

#[test]
fn type_check_demo_reports_mismatch() {
    cmd()
        .args(["--options", r#"{"required_length": 2}"#])
        .write_stdin("ok\n")
        .assert()
        .success()
        .stdout(contains("area(3, 2.5) = 7.5"))
        .stdout(contains("Variable `width` should be type (number) but instead is type (string)"));
}

#[test]
fn inline_options_accept_trimmed_answer() {
    cmd()
        .args(["--skip-type-check", "--options", r#"{"required_length": 2, "return_case": "upper"}"#])
        .write_stdin("  hi  \n")
        .assert()
        .success()
        .stdout(contains("HI"));
}

#[test]
fn exhausted_retries_exit_with_failure() {
    cmd()
        .args(["--skip-type-check", "--options", r#"{"allowed_values": ["y", "n"], "max_retries": 2}"#])
        .write_stdin("maybe\nperhaps\n")
        .assert()
        .failure()
        .stdout(contains("Input should be a value in [y, n]"))
        .stderr(contains("after 2 attempts"));
}

#[test]
fn async_prompt_behaves_the_same() {
    cmd()
        .args(["--skip-type-check", "--async", "--options", r#"{"pattern": "[0-9]+"}"#])
        .write_stdin("x\n42abc\n")
        .assert()
        .success()
        .stdout(contains("42abc"));
}

#[test]
fn missing_config_file_is_not_a_configuration_error() {
    cmd()
        .args(["--skip-type-check", "--config", "does/not/exist.json"])
        .write_stdin("abc\n")
        .assert()
        .failure()
        .stderr(contains("Could not read the options file"))
        .stdout(contains("Incorrect argument specification").not());
}
