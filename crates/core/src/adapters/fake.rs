// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake adapter implementations for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::traits::*;
use crate::analysis::AnalysisId;
use crate::draft::ResultSet;
use crate::task::TaskId;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Fake Job API
// =============================================================================

/// Recorded call to the job API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    StartGeneration { analysis_id: String },
    Regenerate { analysis_id: String },
    TaskStatus { task_id: String },
}

/// Scripted responses and recorded calls
#[derive(Default)]
struct FakeApiState {
    calls: Vec<ApiCall>,
    starts: VecDeque<Result<StartedTask, ApiError>>,
    regenerations: VecDeque<Result<RegenerationStarted, ApiError>>,
    statuses: HashMap<TaskId, VecDeque<Result<StatusReport, ApiError>>>,
    status_delay: Option<Duration>,
}

/// Fake job executor with scripted responses.
///
/// Status scripts are consumed in order; the last entry for a task keeps
/// being returned once the rest are used up. A task with no script answers
/// 404, which the poller treats as transient.
#[derive(Clone, Default)]
pub struct FakeJobApi {
    state: Arc<Mutex<FakeApiState>>,
}

impl FakeJobApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ApiCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Number of status requests issued for a task
    pub fn status_calls(&self, task_id: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::TaskStatus { task_id: id } if id == task_id))
            .count()
    }

    /// Accept the next start request with the given task id
    pub fn accept_start(&self, task_id: &str) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .starts
            .push_back(Ok(StartedTask {
                task_id: task_id.into(),
            }));
    }

    /// Reject the next start request with a non-2xx status
    pub fn reject_start(&self, status: u16) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .starts
            .push_back(Err(ApiError::Rejected { status }));
    }

    /// Accept the next regenerate request
    pub fn accept_regenerate(&self, task_id: &str, model_used: &str) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .regenerations
            .push_back(Ok(RegenerationStarted {
                task_id: task_id.into(),
                model_used: model_used.to_string(),
            }));
    }

    /// Reject the next regenerate request with a non-2xx status
    pub fn reject_regenerate(&self, status: u16) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .regenerations
            .push_back(Err(ApiError::Rejected { status }));
    }

    /// Queue a status string for a task
    pub fn push_status(&self, task_id: &str, status: &str) {
        self.push_status_result(task_id, Ok(StatusReport::new(status)));
    }

    /// Queue a completed status carrying a result set
    pub fn push_completed(&self, task_id: &str, results: ResultSet) {
        self.push_status_result(
            task_id,
            Ok(StatusReport::new(crate::status::COMPLETED).with_result(results)),
        );
    }

    /// Queue a failed status request
    pub fn push_status_error(&self, task_id: &str, error: ApiError) {
        self.push_status_result(task_id, Err(error));
    }

    fn push_status_result(&self, task_id: &str, result: Result<StatusReport, ApiError>) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .statuses
            .entry(task_id.into())
            .or_default()
            .push_back(result);
    }

    /// Delay every status response, simulating a slow executor
    pub fn set_status_delay(&self, delay: Duration) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .status_delay = Some(delay);
    }
}

#[async_trait]
impl JobApi for FakeJobApi {
    async fn start_generation(&self, analysis_id: &AnalysisId) -> Result<StartedTask, ApiError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(ApiCall::StartGeneration {
            analysis_id: analysis_id.to_string(),
        });
        state
            .starts
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted start".to_string())))
    }

    async fn regenerate(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<RegenerationStarted, ApiError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(ApiCall::Regenerate {
            analysis_id: analysis_id.to_string(),
        });
        state
            .regenerations
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted regenerate".to_string())))
    }

    async fn task_status(&self, task_id: &TaskId) -> Result<StatusReport, ApiError> {
        let (response, delay) = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(ApiCall::TaskStatus {
                task_id: task_id.to_string(),
            });
            let response = match state.statuses.get_mut(task_id) {
                Some(script) if script.len() > 1 => script.pop_front(),
                Some(script) => script.front().cloned(),
                None => None,
            };
            (response, state.status_delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        response.unwrap_or(Err(ApiError::Rejected { status: 404 }))
    }
}

// =============================================================================
// Fake View
// =============================================================================

/// Recorded call to the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    ShowInput,
    HideInput,
    ShowResults,
    HideResults,
    SetLoading(bool),
    SetStatusText(String),
    RenderResultList(ResultSet),
    ClearResultList,
    SetActionState {
        control: Control,
        enabled: bool,
        label: String,
    },
    ClearAnalysisInput,
    Alert(String),
}

/// Enabled flag and label of one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

/// What the view currently shows, folded from the recorded calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub input_visible: bool,
    pub results_visible: bool,
    pub loading: bool,
    pub status_text: String,
    pub results: Option<ResultSet>,
    pub generate: ControlState,
    pub regenerate: ControlState,
    pub analysis_input: String,
    pub alerts: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            input_visible: true,
            results_visible: false,
            loading: false,
            status_text: String::new(),
            results: None,
            generate: ControlState {
                enabled: true,
                label: Control::Generate.idle_label().to_string(),
            },
            regenerate: ControlState {
                enabled: true,
                label: Control::Regenerate.idle_label().to_string(),
            },
            analysis_input: String::new(),
            alerts: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn control(&self, control: Control) -> &ControlState {
        match control {
            Control::Generate => &self.generate,
            Control::Regenerate => &self.regenerate,
        }
    }

    fn apply(&mut self, call: &ViewCall) {
        match call {
            ViewCall::ShowInput => self.input_visible = true,
            ViewCall::HideInput => self.input_visible = false,
            ViewCall::ShowResults => self.results_visible = true,
            ViewCall::HideResults => self.results_visible = false,
            ViewCall::SetLoading(visible) => self.loading = *visible,
            ViewCall::SetStatusText(text) => self.status_text = text.clone(),
            ViewCall::RenderResultList(results) => self.results = Some(results.clone()),
            ViewCall::ClearResultList => self.results = None,
            ViewCall::SetActionState {
                control,
                enabled,
                label,
            } => {
                let state = match control {
                    Control::Generate => &mut self.generate,
                    Control::Regenerate => &mut self.regenerate,
                };
                state.enabled = *enabled;
                state.label = label.clone();
            }
            ViewCall::ClearAnalysisInput => self.analysis_input.clear(),
            ViewCall::Alert(message) => self.alerts.push(message.clone()),
        }
    }
}

#[derive(Default)]
struct FakeViewInner {
    calls: Vec<ViewCall>,
    state: ViewState,
}

/// Fake view recording every call. Clones share the same recording.
#[derive(Clone, Default)]
pub struct FakeView {
    inner: Arc<Mutex<FakeViewInner>>,
}

impl FakeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the user typed into the analysis id field
    pub fn type_analysis_input(&self, text: &str) {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .state
            .analysis_input = text.to_string();
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ViewCall> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Current folded view state
    pub fn state(&self) -> ViewState {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .state
            .clone()
    }

    /// Every status text set so far, in order
    pub fn status_history(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ViewCall::SetStatusText(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Number of result lists rendered so far
    pub fn render_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ViewCall::RenderResultList(_)))
            .count()
    }

    fn record(&self, call: ViewCall) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.state.apply(&call);
        inner.calls.push(call);
    }
}

impl ViewSurface for FakeView {
    fn show_input(&mut self) {
        self.record(ViewCall::ShowInput);
    }

    fn hide_input(&mut self) {
        self.record(ViewCall::HideInput);
    }

    fn show_results(&mut self) {
        self.record(ViewCall::ShowResults);
    }

    fn hide_results(&mut self) {
        self.record(ViewCall::HideResults);
    }

    fn set_loading(&mut self, visible: bool) {
        self.record(ViewCall::SetLoading(visible));
    }

    fn set_status_text(&mut self, text: &str) {
        self.record(ViewCall::SetStatusText(text.to_string()));
    }

    fn render_result_list(&mut self, results: &ResultSet) {
        self.record(ViewCall::RenderResultList(results.clone()));
    }

    fn clear_result_list(&mut self) {
        self.record(ViewCall::ClearResultList);
    }

    fn set_action_state(&mut self, control: Control, enabled: bool, label: &str) {
        self.record(ViewCall::SetActionState {
            control,
            enabled,
            label: label.to_string(),
        });
    }

    fn clear_analysis_input(&mut self) {
        self.record(ViewCall::ClearAnalysisInput);
    }

    fn alert(&mut self, message: &str) {
        self.record(ViewCall::Alert(message.to_string()));
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
