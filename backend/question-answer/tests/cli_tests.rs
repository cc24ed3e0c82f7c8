//! End-to-end tests for the `qa-hydrate` binary
//!
//! Run with: cargo test --test cli_tests

mod common;

use serde_json::{json, Value};
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn qa_hydrate(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_qa-hydrate"))
        .args(args)
        .env("APP_ENV", "dev")
        .env_remove("UNKNOWN_ANSWER_TYPE")
        .env_remove("APP__HYDRATION__UNKNOWN_ANSWER_TYPE")
        .env_remove("LOG_FORMAT")
        .env_remove("APP__LOGGING__FORMAT")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start qa-hydrate");

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }

    child.wait_with_output().unwrap()
}

fn arithmetic_document() -> String {
    common::question_answer(
        json!({ "id": 1, "content": "2+2?" }),
        json!({ "type": "MULTIPLE_CHOICE", "selectedIds": [3] }),
    )
    .to_string()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_reads_stdin_without_arguments() {
    let output = qa_hydrate(&[], Some(&arithmetic_document()));

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["question"]["text"], "2+2?");
    assert_eq!(
        value["answerDetails"],
        json!({ "type": "multiple-choice", "selectedIds": [3] })
    );
}

#[test]
fn test_dash_reads_stdin() {
    let output = qa_hydrate(&["-"], Some("null"));

    assert!(output.status.success());
    assert_eq!(stdout_json(&output), Value::Null);
}

#[test]
fn test_reads_files_and_pretty_prints() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answers.json");
    std::fs::write(&path, format!("[{}]", arithmetic_document())).unwrap();

    let output = qa_hydrate(&["--pretty", path.to_str().unwrap()], None);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert!(stdout.contains("\n  {"));
    let value = stdout_json(&output);
    assert_eq!(value[0]["answerDetails"]["selectedIds"], json!([3]));
}

#[test]
fn test_metrics_go_to_stderr() {
    let output = qa_hydrate(&["--metrics"], Some(&arithmetic_document()));

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr.clone()).unwrap();
    assert!(stderr.contains("hydrations_total"));
    assert!(stderr.contains("answer_details_kind_total"));
    assert!(stdout_json(&output).is_object());
}

#[test]
fn test_unknown_type_fails_with_error_chain() {
    let document = common::question_answer(
        common::arithmetic_question(),
        json!({ "type": "essay", "answer": "four" }),
    )
    .to_string();

    let output = qa_hydrate(&[], Some(&document));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to hydrate -"));
    assert!(stderr.contains("unknown answer details type: essay"));
}

#[test]
fn test_missing_file_fails() {
    let output = qa_hydrate(&["/nonexistent/answers.json"], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read /nonexistent/answers.json"));
}
