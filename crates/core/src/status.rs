// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status classification
//!
//! Maps the raw status string reported by the job executor onto a semantic
//! outcome. Pure and deterministic; no I/O.

use crate::draft::ResultSet;

/// Status reported once the task finished and attached its result
pub const COMPLETED: &str = "Completed";

/// Status reported when the backing account has run out of quota
pub const ACCOUNT_EXHAUSTED: &str = "ERROR: ACCOUNT_EXHAUSTED";

/// Prefix of server-reported failures; the remainder is the detail
pub const ERROR_PREFIX: &str = "Error:";

/// Detail used when the executor claims completion without a result
pub const MALFORMED_COMPLETION: &str = "malformed completion";

/// Semantic outcome of one poll tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// Still running; the message is shown verbatim as progress text
    Pending(String),
    Completed(ResultSet),
    ResourceExhausted,
    Error(String),
}

impl StatusOutcome {
    /// Terminal outcomes stop further polling
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StatusOutcome::Pending(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusOutcome::Pending(_) => "pending",
            StatusOutcome::Completed(_) => "completed",
            StatusOutcome::ResourceExhausted => "resource_exhausted",
            StatusOutcome::Error(_) => "error",
        }
    }
}

/// Classify a raw status string and its optional result payload.
///
/// Priority: exhaustion sentinel, then completion, then the error prefix,
/// otherwise progress text.
pub fn classify(status: &str, result: Option<ResultSet>) -> StatusOutcome {
    if status.starts_with(ACCOUNT_EXHAUSTED) {
        return StatusOutcome::ResourceExhausted;
    }

    if status == COMPLETED {
        return match result {
            Some(results) => StatusOutcome::Completed(results),
            None => StatusOutcome::Error(MALFORMED_COMPLETION.to_string()),
        };
    }

    if let Some(detail) = status.strip_prefix(ERROR_PREFIX) {
        return StatusOutcome::Error(detail.trim_start().to_string());
    }

    StatusOutcome::Pending(status.to_string())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
