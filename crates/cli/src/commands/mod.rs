// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod generate;
pub mod interactive;
pub mod regenerate;

use crate::error::MgError;
use crate::output::OutputFormat;
use crate::view::{Notice, TerminalView};
use mg_adapters::{HttpConfig, HttpJobApi, TracedJobApi};
use mg_core::{Controller, ControllerConfig, LaunchOutcome, TaskKind};

pub type CliController = Controller<TracedJobApi<HttpJobApi>, TerminalView>;

/// Settings shared by every command
pub struct Context {
    pub http: HttpConfig,
    pub timing: ControllerConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(http: HttpConfig, timing: ControllerConfig, format: OutputFormat) -> Self {
        Self {
            http,
            timing,
            format,
        }
    }

    pub fn controller(&self, view: TerminalView) -> CliController {
        let api = TracedJobApi::new(HttpJobApi::new(&self.http));
        Controller::new(api, view, self.timing.clone())
    }
}

/// Play a started flow out and turn anything short of new drafts into an error
pub async fn settle(
    controller: &mut CliController,
    outcome: LaunchOutcome,
    kind: TaskKind,
    ctx: &Context,
) -> Result<(), MgError> {
    let handle = match outcome {
        LaunchOutcome::Polling(handle) => handle,
        LaunchOutcome::Invalid(e) => return Err(MgError::invalid_input(e, kind)),
        LaunchOutcome::Rejected(e) => {
            return Err(MgError::start_failed(e, kind, &ctx.http.base_url))
        }
    };

    let renders = controller.view().renders();
    controller.run_until_settled().await;
    if controller.view().renders() > renders {
        return Ok(());
    }

    match controller.view().notice() {
        Some(Notice::Exhausted) => Err(MgError::account_exhausted(&handle)),
        Some(Notice::Failed) | None => Err(MgError::task_failed(&handle)),
    }
}
