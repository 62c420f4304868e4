use guardkit::GuardError;
use guardkit::utils::{IoChannel, PromptOptions, ReturnCase, Terminal};
use std::io::Cursor;

fn ask(input: &str, opts: &PromptOptions) -> (Result<Terminal, GuardError>, String) {
    let mut channel = IoChannel::new(Cursor::new(input.to_string()), Vec::new());
    let res = Terminal::ask(&mut channel, "? ", opts);
    let (_, out) = channel.into_parts();
    (res, String::from_utf8(out).unwrap())
}

#[test]
fn allowed_values_respect_case_sensitivity() {
    let strict = PromptOptions::new().allowed_values(["A", "B"]);
    let (res, out) = ask("a\nA\n", &strict);
    assert_eq!(res.unwrap().answer, "A");
    assert!(out.contains("Case sensitive: true"));

    let relaxed = PromptOptions::new()
        .allowed_values(["A", "B"])
        .case_sensitive(false)
        .return_case(ReturnCase::Upper);
    let (res, _) = ask("a\n", &relaxed);
    let input = res.unwrap();
    assert_eq!(input.answer, "A");
    assert_eq!(input.attempts, 1);
}

#[test]
fn pattern_takes_precedence_over_length() {
    let opts = PromptOptions::new()
        .pattern("^[0-9]{3}$")
        .required_length(5)
        .max_retries(5);
    let (res, out) = ask("12\n12345\n123\n", &opts);
    assert_eq!(res.unwrap().answer, "123");
    assert_eq!(out.matches("required pattern '^[0-9]{3}$'").count(), 2);
    assert!(!out.contains("required length"));
}

#[test]
fn retries_run_out_before_a_valid_answer() {
    let opts = PromptOptions::new().required_length(3).max_retries(2);
    let (res, out) = ask("ab\nxy\nabc\n", &opts);
    assert!(matches!(res, Err(GuardError::RetriesExhausted { attempts: 2 })));
    assert_eq!(
        out,
        "? Input does not match the required length of 3, please try again.\n\
         ? Input did not match the requirements after 2 attempts.\n"
    );
}

#[test]
fn trimmed_answer_is_checked_and_returned() {
    let opts = PromptOptions::new().required_length(2);
    let (res, _) = ask("  hi  \n", &opts);
    assert_eq!(res.unwrap().answer, "hi");
}

#[test]
fn return_case_lower() {
    let opts = PromptOptions::new().return_case(ReturnCase::Lower);
    let (res, _) = ask("MiXeD\n", &opts);
    assert_eq!(res.unwrap().answer, "mixed");
}

#[test]
fn non_integer_max_retries_fails_before_reading() {
    let err = PromptOptions::from_json_str(
        r#"{"required_length": 3, "return_case": "upper", "trim": true, "max_retries": 3.3}"#,
    )
    .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn malformed_pattern_writes_diagnostic_and_reads_nothing() {
    let opts = PromptOptions::new().pattern("[a-");
    let (res, out) = ask("abc\n", &opts);
    assert!(res.unwrap_err().is_configuration());
    assert!(out.starts_with("Incorrect argument specification\n"));
    assert!(!out.lines().any(|line| line.starts_with("? ")));
}

#[test]
fn options_from_json_drive_the_prompt() {
    let opts = PromptOptions::from_json_str(
        r#"{"allowed_values": ["quick", "deep"], "case_sensitive": false, "return_case": "lower"}"#,
    )
    .unwrap();
    let (res, _) = ask("custom\n DEEP \n", &opts);
    let input = res.unwrap();
    assert_eq!(input.answer, "deep");
    assert_eq!(input.attempts, 2);
}
