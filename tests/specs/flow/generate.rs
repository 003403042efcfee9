//! Generate flow specs
//!
//! Start a task, poll it, and render the drafts.

use crate::prelude::*;

#[test]
fn generate_renders_drafts_after_progress() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status("T1", "Generating outline...");
    executor.push_completed("T1", &drafts(&["Hi"]));

    executor
        .mg()
        .args(&["generate", "A-1"])
        .passes()
        .stdout_eq("--- Email 1 ---\nSubject: Hi\n\nBody\n")
        .stderr_has("status: Starting...")
        .stderr_has("status: Generating outline...");

    let requests = executor.requests();
    assert_eq!(requests[0].path, "/start-email-generation");
    assert_eq!(
        requests[0].json(),
        Some(serde_json::json!({ "analysis_id": "A-1" }))
    );
    assert_eq!(executor.status_requests("T1"), 2);
}

#[test]
fn generate_trims_the_analysis_id() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_completed("T1", &drafts(&["Hi"]));

    executor.mg().args(&["generate", "  A-1 "]).passes();

    assert_eq!(
        executor.requests()[0].json(),
        Some(serde_json::json!({ "analysis_id": "A-1" }))
    );
}

#[test]
fn generate_prints_json_result_set() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_completed("T1", &drafts(&["Hi", "Follow-up"]));

    let run = executor
        .mg()
        .args(&["--format", "json", "generate", "A-1"])
        .passes();

    let json = run.stdout_json();
    assert_eq!(json["emails"][0]["subject_line"], "Hi");
    assert_eq!(json["emails"][1]["subject_line"], "Follow-up");
    assert_eq!(json["emails"][1]["email_body"], "Body");
}

#[test]
fn rejected_start_fails_with_status() {
    let executor = Executor::start();
    executor.reject_start(500);

    executor
        .mg()
        .args(&["generate", "A-1"])
        .fails()
        .stdout_eq("")
        .stderr_has("alert: Error generating emails.")
        .stderr_has("status 500");
}

#[test]
fn transient_status_failures_are_skipped() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status_code("T1", 503);
    executor.push_completed("T1", &drafts(&["Hi"]));

    executor
        .mg()
        .args(&["generate", "A-1"])
        .passes()
        .stdout_has("Subject: Hi");
}

#[test]
fn server_error_shows_generic_message_only() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status("T1", "Error: model overloaded");

    executor
        .mg()
        .env("RUST_LOG", "off")
        .args(&["generate", "A-1"])
        .fails()
        .stderr_has("status: An error occurred. See logs for details.")
        .stderr_has("error: generate task T1 failed")
        .stderr_lacks("model overloaded");
}

#[test]
fn server_error_detail_is_logged() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status("T1", "Error: model overloaded");

    executor
        .mg()
        .env("RUST_LOG", "error")
        .args(&["generate", "A-1"])
        .fails()
        .stderr_has("model overloaded");
}

#[test]
fn completion_without_result_fails() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status("T1", "Completed");

    executor
        .mg()
        .args(&["generate", "A-1"])
        .fails()
        .stdout_eq("")
        .stderr_has("status: An error occurred. See logs for details.");
}

#[test]
fn unreadable_status_body_fails() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_raw_status("T1", "<html>gateway</html>");

    executor
        .mg()
        .args(&["generate", "A-1"])
        .fails()
        .stderr_has("error: generate task T1 failed");

    assert_eq!(executor.status_requests("T1"), 1);
}
