//! Argument and connection error specs

use crate::prelude::*;

#[test]
fn missing_command_fails() {
    mg().fails().stderr_has("Usage");
}

#[test]
fn unknown_format_fails() {
    mg().args(&["--format", "yaml", "generate", "A-1"])
        .fails()
        .stderr_has("yaml");
}

#[test]
fn blank_analysis_id_fails_without_network() {
    let executor = Executor::start();

    executor
        .mg()
        .args(&["generate", "   "])
        .fails()
        .stderr_has("alert: Please enter an analysis ID")
        .stderr_has("error: Nothing to generate: analysis id is required")
        .stdout_eq("");

    assert!(executor.requests().is_empty());
}

#[test]
fn unreachable_executor_suggests_base_url() {
    mg().args(&["generate", "A-1"])
        .fails()
        .stderr_has("alert: Error generating emails.")
        .stderr_has("error: Failed to start generate task")
        .stderr_has("--base-url");
}

#[test]
fn base_url_flag_overrides_environment() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_completed("T1", &drafts(&["Hi"]));

    executor
        .mg()
        .env("MG_BASE_URL", &unreachable_url())
        .args(&["--base-url", &executor.url(), "generate", "A-1"])
        .passes()
        .stdout_has("Subject: Hi");
}
