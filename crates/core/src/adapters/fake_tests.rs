// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::draft::EmailDraft;

fn analysis(id: &str) -> AnalysisId {
    AnalysisId::parse(id).unwrap()
}

#[tokio::test]
async fn fake_api_records_calls_in_order() {
    let api = FakeJobApi::new();
    api.accept_start("T1");
    api.push_status("T1", "Working");

    api.start_generation(&analysis("A-1")).await.unwrap();
    api.task_status(&TaskId::from("T1")).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::StartGeneration {
                analysis_id: "A-1".to_string()
            },
            ApiCall::TaskStatus {
                task_id: "T1".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn fake_api_unscripted_start_fails_as_transport() {
    let api = FakeJobApi::new();
    let err = api.start_generation(&analysis("A-1")).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn fake_api_repeats_last_status() {
    let api = FakeJobApi::new();
    let task = TaskId::from("T1");
    api.push_status("T1", "Queued");
    api.push_completed("T1", ResultSet::new(vec![EmailDraft::new("Hi", "Body")]));

    assert_eq!(api.task_status(&task).await.unwrap().status, "Queued");
    assert_eq!(api.task_status(&task).await.unwrap().status, "Completed");
    assert_eq!(api.task_status(&task).await.unwrap().status, "Completed");
    assert_eq!(api.status_calls("T1"), 3);
}

#[tokio::test]
async fn fake_api_unknown_task_is_not_found() {
    let api = FakeJobApi::new();
    let err = api.task_status(&TaskId::from("missing")).await.unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 404 });
    assert!(err.is_transient());
}

#[test]
fn fake_view_folds_calls_into_state() {
    let mut view = FakeView::new();
    view.type_analysis_input("A-1");

    view.set_action_state(Control::Generate, false, "Generating...");
    view.set_status_text("Starting...");
    view.hide_input();
    view.show_results();
    view.clear_analysis_input();

    let state = view.state();
    assert!(!state.input_visible);
    assert!(state.results_visible);
    assert_eq!(state.status_text, "Starting...");
    assert!(!state.generate.enabled);
    assert_eq!(state.generate.label, "Generating...");
    assert!(state.analysis_input.is_empty());
    assert_eq!(view.calls().len(), 5);
}

#[test]
fn fake_view_clones_share_recording() {
    let view = FakeView::new();
    let mut handle = view.clone();
    handle.alert("Please enter an analysis ID");
    assert_eq!(view.state().alerts, vec!["Please enter an analysis ID"]);
}
