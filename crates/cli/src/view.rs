// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal implementation of the view surface
//!
//! Status lines and alerts go to stderr; rendered drafts go to stdout so
//! they can be piped. Controls have no terminal counterpart and are only
//! logged.

use crate::output::{self, OutputFormat};
use mg_core::controller::{EXHAUSTED_TEXT, GENERIC_ERROR_TEXT};
use mg_core::{Control, ResultSet, ViewSurface};
use std::io::Write;

/// How the most recent flow ended, when it ended without drafts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Exhausted,
    Failed,
}

type Sink = Box<dyn Write + Send>;

pub struct TerminalView {
    format: OutputFormat,
    out: Sink,
    err: Sink,
    last_status: String,
    notice: Option<Notice>,
    renders: usize,
    input_visible: bool,
    hints: bool,
}

impl TerminalView {
    pub fn stdio(format: OutputFormat) -> Self {
        Self::with_writers(format, Box::new(std::io::stdout()), Box::new(std::io::stderr()))
    }

    pub fn with_writers(format: OutputFormat, out: Sink, err: Sink) -> Self {
        Self {
            format,
            out,
            err,
            last_status: String::new(),
            notice: None,
            renders: 0,
            input_visible: true,
            hints: false,
        }
    }

    /// Print what the user can type next (interactive sessions)
    pub fn with_hints(mut self) -> Self {
        self.hints = true;
        self
    }

    /// Number of result lists written so far
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    fn line(&mut self, text: &str) {
        // A closed stderr is not worth failing the flow over
        let _ = writeln!(self.err, "{text}");
    }
}

impl ViewSurface for TerminalView {
    fn show_input(&mut self) {
        if !self.input_visible && self.hints {
            self.line("ready: generate <analysis-id>");
        }
        self.input_visible = true;
    }

    fn hide_input(&mut self) {
        self.input_visible = false;
    }

    fn show_results(&mut self) {
        tracing::trace!("results shown");
    }

    fn hide_results(&mut self) {
        tracing::trace!("results hidden");
    }

    fn set_loading(&mut self, visible: bool) {
        if visible {
            self.notice = None;
        }
    }

    fn set_status_text(&mut self, text: &str) {
        if text == self.last_status {
            return;
        }
        self.last_status = text.to_string();

        match text {
            "" => return,
            EXHAUSTED_TEXT => self.notice = Some(Notice::Exhausted),
            GENERIC_ERROR_TEXT => self.notice = Some(Notice::Failed),
            _ => {}
        }
        self.line(&format!("status: {text}"));
    }

    fn render_result_list(&mut self, results: &ResultSet) {
        self.renders += 1;
        if let Err(e) = output::write(&mut self.out, results, self.format) {
            tracing::warn!(error = %e, "failed to write drafts");
        }
        if self.hints {
            self.line("ready: regenerate | new | quit");
        }
    }

    fn clear_result_list(&mut self) {
        tracing::trace!("result list cleared");
    }

    fn set_action_state(&mut self, control: Control, enabled: bool, label: &str) {
        tracing::debug!(%control, enabled, label, "control updated");
    }

    fn clear_analysis_input(&mut self) {
        tracing::trace!("analysis input cleared");
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("alert: {message}"));
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
