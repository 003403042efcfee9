// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task handles
//!
//! A task is one server-side unit of work. The handle is created when a
//! start request is accepted and is owned by the poller bound to it.

use crate::adapters::Control;
use crate::analysis::AnalysisId;
use serde::{Deserialize, Serialize};

/// Server-assigned task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// Which start endpoint produced the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Generate,
    Regenerate,
}

impl TaskKind {
    /// The action control that triggered this kind of task
    pub fn control(self) -> Control {
        match self {
            TaskKind::Generate => Control::Generate,
            TaskKind::Regenerate => Control::Regenerate,
        }
    }

    pub fn is_regeneration(self) -> bool {
        matches!(self, TaskKind::Regenerate)
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskKind::Generate => write!(f, "generate"),
            TaskKind::Regenerate => write!(f, "regenerate"),
        }
    }
}

/// Immutable record of one in-flight or completed task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub task_id: TaskId,
    pub kind: TaskKind,
    /// The analysis the task was started for
    pub analysis_id: AnalysisId,
}

impl TaskHandle {
    pub fn new(task_id: impl Into<TaskId>, kind: TaskKind, analysis_id: AnalysisId) -> Self {
        Self {
            task_id: task_id.into(),
            kind,
            analysis_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_to_triggering_control() {
        assert_eq!(TaskKind::Generate.control(), Control::Generate);
        assert_eq!(TaskKind::Regenerate.control(), Control::Regenerate);
    }

    #[test]
    fn task_id_is_transparent_on_the_wire() {
        let id: TaskId = serde_json::from_str("\"T1\"").unwrap();
        assert_eq!(id, TaskId::from("T1"));
    }
}
