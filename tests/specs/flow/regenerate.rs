//! Regenerate flow specs

use crate::prelude::*;

#[test]
fn regenerate_renders_replacement_drafts() {
    let executor = Executor::start();
    executor.accept_regenerate("T2", "large-model");
    executor.push_status("T2", "Rewriting...");
    executor.push_completed("T2", &drafts(&["Second"]));

    executor
        .mg()
        .args(&["regenerate", "A-1"])
        .passes()
        .stdout_has("Subject: Second")
        .stderr_has("status: Finalizing content...")
        .stderr_has("status: Rewriting...")
        .stderr_lacks("large-model");

    let requests = executor.requests();
    assert_eq!(requests[0].path, "/regenerate-email");
    assert_eq!(
        requests[0].json(),
        Some(serde_json::json!({ "analysis_id": "A-1" }))
    );
}

#[test]
fn rejected_regenerate_fails() {
    let executor = Executor::start();
    executor.reject_regenerate(502);

    executor
        .mg()
        .args(&["regenerate", "A-1"])
        .fails()
        .stderr_has("alert: Error regenerating email.")
        .stderr_has("error: Failed to start regenerate task");
}

#[test]
fn blank_regenerate_id_fails_without_network() {
    let executor = Executor::start();

    executor
        .mg()
        .args(&["regenerate", ""])
        .fails()
        .stderr_has("Nothing to regenerate");

    assert!(executor.requests().is_empty());
}
