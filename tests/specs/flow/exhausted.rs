//! Account exhaustion specs
//!
//! The exhaustion message stays up for the clear delay before the flow ends.

use crate::prelude::*;
use std::time::{Duration, Instant};

#[test]
fn exhausted_account_fails_after_clear_delay() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status("T1", "ERROR: ACCOUNT_EXHAUSTED");

    let started = Instant::now();
    executor
        .mg()
        .env("MG_EXHAUSTED_CLEAR_MS", "400")
        .args(&["generate", "A-1"])
        .fails()
        .stdout_eq("")
        .stderr_has("status: Contact Admin - Account Exhausted")
        .stderr_has("error: Account exhausted")
        .stderr_has("administrator");

    assert!(started.elapsed() >= Duration::from_millis(400));
    assert_eq!(executor.status_requests("T1"), 1);
}

#[test]
fn exhaustion_wins_over_attached_result() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_raw_status(
        "T1",
        r#"{"status":"ERROR: ACCOUNT_EXHAUSTED","result":{"emails":[{"subject_line":"Hi","email_body":"Body"}]}}"#,
    );

    executor
        .mg()
        .args(&["generate", "A-1"])
        .fails()
        .stdout_eq("")
        .stderr_has("error: Account exhausted");
}
