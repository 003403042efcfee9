// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every flow that ends without rendered drafts is reported as an
//! [`MgError`]:
//! - What went wrong (message)
//! - Why it might have happened (context)
//! - How to fix it (suggestions)

use mg_core::{ApiError, TaskHandle, TaskKind, ValidationError};
use std::fmt;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct MgError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl MgError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for MgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for MgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Common error builders for the ways a flow can end without drafts.
impl MgError {
    /// Input was refused before any request went out.
    pub fn invalid_input(error: ValidationError, kind: TaskKind) -> Self {
        MgError::new(format!("Nothing to {}: {}", kind, error))
            .with_suggestion(format!("Pass the analysis id: mg {} <ANALYSIS_ID>", kind))
            .with_source(error)
    }

    /// The start endpoint refused the task or could not be reached.
    pub fn start_failed(error: ApiError, kind: TaskKind, base_url: &str) -> Self {
        let err = MgError::new(format!("Failed to start {} task", kind))
            .with_context(error.to_string())
            .with_context(format!("Job executor: {}", base_url));

        let err = match error {
            ApiError::Rejected { .. } => err
                .with_suggestion("Check that the analysis id exists on the executor")
                .with_suggestion("Inspect the executor's logs for the rejected request"),
            ApiError::Transport(_) | ApiError::Decode(_) => err
                .with_suggestion(format!("Check that the job executor is running at {}", base_url))
                .with_suggestion("Point mg at another executor with --base-url or MG_BASE_URL"),
        };
        err.with_source(error)
    }

    /// The executor ran out of quota for the account.
    pub fn account_exhausted(handle: &TaskHandle) -> Self {
        MgError::new("Account exhausted")
            .with_context(format!(
                "Task {} for analysis {} was refused for lack of quota",
                handle.task_id, handle.analysis_id
            ))
            .with_suggestion("Contact an administrator to restore the account")
    }

    /// The task ended in an error; the raw detail is only in the log.
    pub fn task_failed(handle: &TaskHandle) -> Self {
        MgError::new(format!("{} task {} failed", handle.kind, handle.task_id))
            .with_context(format!("Analysis: {}", handle.analysis_id))
            .with_context("The executor's message was logged, not shown")
            .with_suggestion("Re-run with RUST_LOG=mg_core=error (or more verbose) to see it")
            .with_suggestion(format!(
                "Try again: mg {} {}",
                handle.kind, handle.analysis_id
            ))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
