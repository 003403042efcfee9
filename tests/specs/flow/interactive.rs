//! Interactive session specs
//!
//! Commands arrive on stdin while poll updates keep coming in.

use crate::prelude::*;

#[test]
fn interactive_generate_plays_out_at_end_of_input() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_completed("T1", &drafts(&["Hi"]));

    executor
        .mg()
        .args(&["interactive"])
        .stdin("generate A-1\n")
        .passes()
        .stdout_has("Subject: Hi")
        .stderr_has("ready: regenerate | new | quit");
}

#[test]
fn second_generate_supersedes_the_first() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_status("T1", "Working on A");
    executor.push_completed("T1", &drafts(&["From A"]));
    executor.accept_start("T2");
    executor.push_completed("T2", &drafts(&["From B"]));

    executor
        .mg()
        .args(&["interactive"])
        .stdin("generate A\ngenerate B\n")
        .passes()
        .stdout_has("Subject: From B")
        .stdout_lacks("From A");
}

#[test]
fn regenerate_without_rendered_drafts_alerts() {
    let executor = Executor::start();

    executor
        .mg()
        .args(&["interactive"])
        .stdin("regenerate\n")
        .passes()
        .stderr_has("alert: Generate emails before regenerating");

    assert!(executor.requests().is_empty());
}

#[test]
fn blank_generate_alerts_and_continues() {
    let executor = Executor::start();
    executor.accept_start("T1");
    executor.push_completed("T1", &drafts(&["Hi"]));

    executor
        .mg()
        .args(&["interactive"])
        .stdin("generate\ngenerate A-1\n")
        .passes()
        .stderr_has("alert: Please enter an analysis ID")
        .stdout_has("Subject: Hi");
}

#[test]
fn quit_ignores_remaining_input() {
    let executor = Executor::start();
    executor.accept_start("T1");

    executor
        .mg()
        .args(&["interactive"])
        .stdin("quit\ngenerate A-1\n")
        .passes();

    assert!(executor.requests().is_empty());
}

#[test]
fn unknown_command_prints_help() {
    mg().args(&["interactive"])
        .stdin("launch A-1\nnew\n")
        .passes()
        .stderr_has("unknown command 'launch'")
        .stderr_has("commands: generate <id>");
}
