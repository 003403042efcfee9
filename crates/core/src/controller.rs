// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle controller
//!
//! Drives one generate/regenerate flow at a time: validates input, starts
//! the task, owns the single active poller, and turns poll outcomes into
//! view updates.
//!
//! All mutation goes through `&mut self`, so each operation runs to
//! completion before the next event is looked at. Poll updates and the
//! exhaustion timer arrive as [`ControllerEvent`]s that the owner feeds
//! back through [`Controller::handle_event`].

use crate::adapters::{ApiError, Control, JobApi, ViewSurface};
use crate::analysis::{AnalysisId, ValidationError};
use crate::config::ControllerConfig;
use crate::poller::{PollUpdate, Poller, PollerId};
use crate::status::StatusOutcome;
use crate::task::{TaskHandle, TaskKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Progress text shown while a generation task is being started
pub const STARTING_TEXT: &str = "Starting...";
/// Progress text shown while a regeneration task is being started
pub const FINALIZING_TEXT: &str = "Finalizing content...";
/// Status text shown when the backing account has run out of quota
pub const EXHAUSTED_TEXT: &str = "Contact Admin - Account Exhausted";
/// Status text shown for any other failure; details go to the log only
pub const GENERIC_ERROR_TEXT: &str = "An error occurred. See logs for details.";

pub const MISSING_ID_ALERT: &str = "Please enter an analysis ID";
pub const NOTHING_RENDERED_ALERT: &str = "Generate emails before regenerating";
pub const GENERATE_FAILED_ALERT: &str = "Error generating emails.";
pub const REGENERATE_FAILED_ALERT: &str = "Error regenerating email.";

/// Where the controller is in the flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    AwaitingGenerate,
    AwaitingRegenerate,
    Rendered,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Idle => write!(f, "idle"),
            Mode::AwaitingGenerate => write!(f, "awaiting-generate"),
            Mode::AwaitingRegenerate => write!(f, "awaiting-regenerate"),
            Mode::Rendered => write!(f, "rendered"),
        }
    }
}

/// The controller's mutable state. At most one poller is active.
#[derive(Debug, Default)]
pub struct ControllerState {
    pub active_poller: Option<Poller>,
    pub mode: Mode,
}

/// Asynchronous input to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A classified poll tick
    Poll(PollUpdate),
    /// The exhaustion message for this poller's flow has been shown long enough
    ExhaustedDelayElapsed { poller: PollerId },
}

/// Result of a launch or regenerate request.
///
/// The view has already been updated; this only reports what happened.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// The task was accepted and is being polled
    Polling(TaskHandle),
    /// Nothing was sent
    Invalid(ValidationError),
    /// The start endpoint refused or could not be reached
    Rejected(ApiError),
}

impl LaunchOutcome {
    pub fn is_polling(&self) -> bool {
        matches!(self, LaunchOutcome::Polling(_))
    }
}

/// Exhaustion message waiting to be cleared
struct PendingClear {
    poller: PollerId,
    control: Control,
    timer: JoinHandle<()>,
}

pub struct Controller<A: JobApi, V: ViewSurface> {
    api: A,
    view: V,
    config: ControllerConfig,
    state: ControllerState,
    /// Analysis whose results are on screen
    rendered_for: Option<AnalysisId>,
    pending_clear: Option<PendingClear>,
    next_poller: u64,
    poll_tx: mpsc::UnboundedSender<PollUpdate>,
    poll_rx: mpsc::UnboundedReceiver<PollUpdate>,
    timer_tx: mpsc::UnboundedSender<PollerId>,
    timer_rx: mpsc::UnboundedReceiver<PollerId>,
}

impl<A: JobApi, V: ViewSurface> Controller<A, V> {
    pub fn new(api: A, view: V, config: ControllerConfig) -> Self {
        let (poll_tx, poll_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            api,
            view,
            config,
            state: ControllerState::default(),
            rendered_for: None,
            pending_clear: None,
            next_poller: 1,
            poll_tx,
            poll_rx,
            timer_tx,
            timer_rx,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Handle of the task currently being polled
    pub fn active_task(&self) -> Option<&TaskHandle> {
        self.state.active_poller.as_ref().map(Poller::handle)
    }

    /// Analysis whose result list is currently rendered
    pub fn rendered_for(&self) -> Option<&AnalysisId> {
        self.rendered_for.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.state.active_poller.is_some()
    }

    /// No poller running and no exhaustion message waiting to clear
    pub fn is_settled(&self) -> bool {
        self.state.active_poller.is_none() && self.pending_clear.is_none()
    }

    /// Start a generation task for `raw_analysis_id`
    pub async fn launch(&mut self, raw_analysis_id: &str) -> LaunchOutcome {
        let analysis_id = match AnalysisId::parse(raw_analysis_id) {
            Ok(id) => id,
            Err(e) => return self.reject_input(e),
        };

        self.supersede();
        self.state.mode = Mode::AwaitingGenerate;
        self.begin_flow(Control::Generate, STARTING_TEXT);

        match self.api.start_generation(&analysis_id).await {
            Ok(started) => {
                tracing::info!(%analysis_id, task_id = %started.task_id, "generation started");
                let handle = TaskHandle::new(started.task_id, TaskKind::Generate, analysis_id);
                self.start_poller(handle.clone());
                LaunchOutcome::Polling(handle)
            }
            Err(e) => {
                tracing::error!(%analysis_id, error = %e, "failed to start generation");
                self.abort_flow(Control::Generate, GENERATE_FAILED_ALERT);
                LaunchOutcome::Rejected(e)
            }
        }
    }

    /// Start a task that replaces the drafts for `raw_analysis_id`.
    ///
    /// Rendered results stay visible; only the regenerate control is
    /// disabled while the task runs.
    pub async fn regenerate(&mut self, raw_analysis_id: &str) -> LaunchOutcome {
        let analysis_id = match AnalysisId::parse(raw_analysis_id) {
            Ok(id) => id,
            Err(e) => return self.reject_input(e),
        };

        self.supersede();
        self.state.mode = Mode::AwaitingRegenerate;
        self.begin_flow(Control::Regenerate, FINALIZING_TEXT);

        match self.api.regenerate(&analysis_id).await {
            Ok(started) => {
                tracing::info!(
                    %analysis_id,
                    task_id = %started.task_id,
                    model_used = %started.model_used,
                    "regeneration started"
                );
                let handle = TaskHandle::new(started.task_id, TaskKind::Regenerate, analysis_id);
                self.start_poller(handle.clone());
                LaunchOutcome::Polling(handle)
            }
            Err(e) => {
                tracing::error!(%analysis_id, error = %e, "failed to start regeneration");
                self.abort_flow(Control::Regenerate, REGENERATE_FAILED_ALERT);
                LaunchOutcome::Rejected(e)
            }
        }
    }

    /// Regenerate the analysis whose results are on screen
    pub async fn regenerate_current(&mut self) -> LaunchOutcome {
        match self.rendered_for.clone() {
            Some(analysis_id) => self.regenerate(analysis_id.as_str()).await,
            None => self.reject_input(ValidationError::NothingRendered),
        }
    }

    /// Drop everything and return to an empty input form
    pub fn start_new_analysis(&mut self) {
        self.supersede();
        self.view.hide_results();
        self.view.clear_result_list();
        self.view.show_input();
        self.view.clear_analysis_input();
        self.view.set_loading(false);
        self.view.set_status_text("");
        self.view
            .set_action_state(Control::Generate, true, Control::Generate.idle_label());
        self.rendered_for = None;
        self.state.mode = Mode::Idle;
        tracing::debug!("reset to new analysis");
    }

    /// Wait for the next poll update or timer
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        tokio::select! {
            Some(update) = self.poll_rx.recv() => Some(ControllerEvent::Poll(update)),
            Some(poller) = self.timer_rx.recv() => {
                Some(ControllerEvent::ExhaustedDelayElapsed { poller })
            }
            else => None,
        }
    }

    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Poll(update) => self.on_poll_update(update),
            ControllerEvent::ExhaustedDelayElapsed { poller } => self.on_exhausted_delay(poller),
        }
    }

    /// Process events until the current flow has fully played out
    pub async fn run_until_settled(&mut self) {
        while !self.is_settled() {
            match self.next_event().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
    }

    fn reject_input(&mut self, error: ValidationError) -> LaunchOutcome {
        tracing::warn!(error = %error, "request not sent");
        let message = match error {
            ValidationError::EmptyAnalysisId => MISSING_ID_ALERT,
            ValidationError::NothingRendered => NOTHING_RENDERED_ALERT,
        };
        self.view.alert(message);
        LaunchOutcome::Invalid(error)
    }

    /// Stop whatever the previous flow left running and release its control
    fn supersede(&mut self) {
        if let Some(mut poller) = self.state.active_poller.take() {
            tracing::info!(poller = %poller.id(), task_id = %poller.handle().task_id, "superseding active poller");
            poller.stop();
            let control = poller.handle().kind.control();
            self.view.set_action_state(control, true, control.idle_label());
        }
        if let Some(pending) = self.pending_clear.take() {
            pending.timer.abort();
            self.finish_exhausted(pending.control);
        }
    }

    fn begin_flow(&mut self, control: Control, progress: &str) {
        self.view.set_action_state(control, false, control.busy_label());
        self.view.set_loading(true);
        self.view.set_status_text(progress);
    }

    fn abort_flow(&mut self, control: Control, alert: &str) {
        self.view.set_action_state(control, true, control.idle_label());
        self.view.set_loading(false);
        self.view.set_status_text("");
        self.view.alert(alert);
        self.state.mode = self.settled_mode();
    }

    fn start_poller(&mut self, handle: TaskHandle) {
        let id = PollerId(self.next_poller);
        self.next_poller += 1;
        let poller = Poller::start(
            id,
            handle,
            self.api.clone(),
            self.config.poll_interval,
            self.poll_tx.clone(),
        );
        self.state.active_poller = Some(poller);
    }

    /// Mode to fall back to once a flow ends without new results
    fn settled_mode(&self) -> Mode {
        if self.rendered_for.is_some() {
            Mode::Rendered
        } else {
            Mode::Idle
        }
    }

    fn on_poll_update(&mut self, update: PollUpdate) {
        let Some(active) = self
            .state
            .active_poller
            .as_ref()
            .filter(|poller| poller.id() == update.poller)
        else {
            tracing::debug!(
                poller = %update.poller,
                task_id = %update.task_id,
                outcome = update.outcome.name(),
                "discarding update from inactive poller"
            );
            return;
        };
        let handle = active.handle().clone();

        if update.outcome.is_terminal() {
            if let Some(mut poller) = self.state.active_poller.take() {
                poller.stop();
            }
        }

        self.on_outcome(update.poller, &handle, update.outcome);
    }

    fn on_outcome(&mut self, poller: PollerId, handle: &TaskHandle, outcome: StatusOutcome) {
        let control = handle.kind.control();

        match outcome {
            StatusOutcome::Pending(progress) => {
                self.view.set_status_text(&progress);
            }

            StatusOutcome::Completed(results) => {
                tracing::info!(task_id = %handle.task_id, drafts = results.len(), "task completed");
                self.view.set_action_state(control, true, control.idle_label());
                self.view.set_loading(false);
                self.view.set_status_text("");
                if !handle.kind.is_regeneration() {
                    self.view.hide_input();
                }
                self.view.show_results();
                self.view.render_result_list(&results);
                // A fresh list always comes with a usable regenerate control
                if control != Control::Regenerate {
                    self.view.set_action_state(
                        Control::Regenerate,
                        true,
                        Control::Regenerate.idle_label(),
                    );
                }
                self.rendered_for = Some(handle.analysis_id.clone());
                self.state.mode = Mode::Rendered;
            }

            StatusOutcome::ResourceExhausted => {
                tracing::warn!(task_id = %handle.task_id, "account exhausted");
                self.view.set_loading(false);
                self.view.set_status_text(EXHAUSTED_TEXT);

                let delay = self.config.exhausted_clear_delay;
                let timer_tx = self.timer_tx.clone();
                let timer = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = timer_tx.send(poller);
                });
                self.pending_clear = Some(PendingClear {
                    poller,
                    control,
                    timer,
                });
                self.state.mode = self.settled_mode();
            }

            StatusOutcome::Error(detail) => {
                tracing::error!(task_id = %handle.task_id, %detail, "task failed");
                self.view.set_action_state(control, true, control.idle_label());
                self.view.set_loading(false);
                self.view.set_status_text(GENERIC_ERROR_TEXT);
                self.state.mode = self.settled_mode();
            }
        }
    }

    fn on_exhausted_delay(&mut self, poller: PollerId) {
        match self.pending_clear.take() {
            Some(pending) if pending.poller == poller => self.finish_exhausted(pending.control),
            other => {
                self.pending_clear = other;
                tracing::debug!(%poller, "discarding stale exhaustion timer");
            }
        }
    }

    fn finish_exhausted(&mut self, control: Control) {
        self.view.set_status_text("");
        self.view.set_action_state(control, true, control.idle_label());
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
