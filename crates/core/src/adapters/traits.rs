// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter trait definitions for external collaborators

use crate::analysis::AnalysisId;
use crate::draft::ResultSet;
use crate::task::TaskId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Job API (backend job executor)
// =============================================================================

/// Body of an accepted `POST /start-email-generation`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartedTask {
    pub task_id: TaskId,
}

/// Body of an accepted `POST /regenerate-email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerationStarted {
    pub task_id: TaskId,
    #[serde(default)]
    pub model_used: String,
}

/// Body of `GET /task-status/{task_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultSet>,
}

impl StatusReport {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            result: None,
        }
    }

    pub fn with_result(mut self, result: ResultSet) -> Self {
        self.result = Some(result);
        self
    }
}

/// Errors from job API requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status
    #[error("server responded with status {status}")]
    Rejected { status: u16 },
    /// The request did not complete
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body was not the expected JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// A rejected status check may succeed on the next tick
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Rejected { .. })
    }
}

/// Adapter for the backend job executor
#[async_trait]
pub trait JobApi: Clone + Send + Sync + 'static {
    /// Start a fresh generation task for an analysis
    async fn start_generation(&self, analysis_id: &AnalysisId) -> Result<StartedTask, ApiError>;

    /// Start a task that replaces the drafts of an analysis
    async fn regenerate(&self, analysis_id: &AnalysisId)
        -> Result<RegenerationStarted, ApiError>;

    /// Fetch the current status of a task
    async fn task_status(&self, task_id: &TaskId) -> Result<StatusReport, ApiError>;
}

// =============================================================================
// View Surface (UI)
// =============================================================================

/// Action controls the controller enables, disables, and relabels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Generate,
    Regenerate,
}

impl Control {
    /// Label shown while the control is available
    pub fn idle_label(self) -> &'static str {
        match self {
            Control::Generate => "Generate",
            Control::Regenerate => "Regenerate Email",
        }
    }

    /// Label shown while the control's flow is running
    pub fn busy_label(self) -> &'static str {
        match self {
            Control::Generate => "Generating...",
            Control::Regenerate => "Regenerating...",
        }
    }
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::Generate => write!(f, "generate"),
            Control::Regenerate => write!(f, "regenerate"),
        }
    }
}

/// Presentation operations the controller drives. No business logic.
///
/// Rendering a result list arms the regenerate control; a front end reports
/// a press of that control back to the controller as a regenerate action.
pub trait ViewSurface: Send + 'static {
    fn show_input(&mut self);
    fn hide_input(&mut self);
    fn show_results(&mut self);
    fn hide_results(&mut self);
    fn set_loading(&mut self, visible: bool);
    fn set_status_text(&mut self, text: &str);
    fn render_result_list(&mut self, results: &ResultSet);
    fn clear_result_list(&mut self);
    fn set_action_state(&mut self, control: Control, enabled: bool, label: &str);
    fn clear_analysis_input(&mut self);
    /// Blocking notice for failures that end a flow before polling starts
    fn alert(&mut self, message: &str);
}
