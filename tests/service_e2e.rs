// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end tests across the workspace: spec -> runner -> execution ->
//! service -> action record, covering the three canonical scenarios
//! (clean run with discovered output, timeout with forced termination,
//! unstartable executable).

#![cfg(unix)]

use rex_exec::{ActionRecord, ScriptExecuterService, ScriptParam};
use rex_process::{ProcessError, ProcessSpec};
use std::io::Write;
use std::time::Duration;

fn write_script(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".rb")
        .tempfile()
        .expect("create temp script");
    file.write_all(content.as_bytes()).expect("write script");
    file.flush().expect("flush script");
    file
}

// Scenario A: a script printing `Result : 30`, exit 0, no timeout.
#[tokio::test]
async fn scenario_clean_run_discovers_output() {
    let script = write_script("echo \"Result : $(( $1 + $2 ))\"\n");
    let service = ScriptExecuterService::with_interpreter("sh");
    let mut record = ActionRecord::new();

    service
        .execute_script_file(
            &mut record,
            script.path().to_path_buf(),
            ":",
            vec![
                ScriptParam::new("Param 1", "10"),
                ScriptParam::new("Param 2", "20"),
            ],
            None,
        )
        .await;

    assert!(record.is_clean(), "errors: {:?}", record.errors);
    assert!(!record.outputs.is_empty(), "expected discovered outputs");
    assert!(record.outputs[0].1.contains("30"));
}

// Scenario B: a script sleeping past the timeout.
#[tokio::test]
async fn scenario_timeout_terminates_and_reports() {
    let service = ScriptExecuterService::with_interpreter("sh");
    let mut record = ActionRecord::new();

    service
        .execute_script(
            &mut record,
            "sleep 5\necho never=reached\n".into(),
            "=",
            Vec::new(),
            Some(Duration::from_millis(500)),
        )
        .await;

    assert!(record.outputs.is_empty());
    assert!(record.errors.iter().any(|e| e.contains("timed out")));
}

// Scenario C: nonexistent executable -> start failure, no drains attempted.
#[tokio::test]
async fn scenario_unstartable_executable_surfaces_immediately() {
    let err = rex_process::run(&ProcessSpec::new("/no/such/interpreter"))
        .await
        .expect_err("spawn must fail");
    assert!(matches!(err, ProcessError::Spawn(_)));

    // The same condition reaches a host through the sink.
    let service = ScriptExecuterService::with_interpreter("/no/such/interpreter");
    let mut record = ActionRecord::new();
    service
        .execute_script(&mut record, "puts 1".into(), "=", Vec::new(), None)
        .await;
    assert_eq!(record.errors.len(), 1);
    assert!(record.errors[0].contains("failed to start interpreter"));
}

// Repeated service use shares no state between runs.
#[tokio::test]
async fn sequential_actions_are_isolated() {
    let service = ScriptExecuterService::with_interpreter("sh");

    let mut first = ActionRecord::new();
    service
        .execute_script(&mut first, "echo run=one\n".into(), "=", Vec::new(), None)
        .await;

    let mut second = ActionRecord::new();
    service
        .execute_script(&mut second, "echo run=two\n".into(), "=", Vec::new(), None)
        .await;

    assert_eq!(first.outputs, vec![("run".to_string(), "one".to_string())]);
    assert_eq!(second.outputs, vec![("run".to_string(), "two".to_string())]);
}
