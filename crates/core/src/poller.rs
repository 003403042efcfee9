// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Poller bound to one task
//!
//! Each poller owns a repeating timer. On every tick it requests the task's
//! status, classifies it, and sends the outcome to the controller. The loop
//! ends after the first terminal outcome, so a poller delivers at most one.
//! Updates carry the poller's id; the controller drops updates from any
//! poller it no longer considers active.

use crate::adapters::{ApiError, JobApi};
use crate::status::{classify, StatusOutcome};
use crate::task::{TaskHandle, TaskId};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Detail reported when a status request could not be completed
pub const POLLING_FAILED: &str = "polling failed";

/// Identity of one poller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PollerId(pub u64);

impl std::fmt::Display for PollerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "poller-{}", self.0)
    }
}

/// One classified tick, tagged with the poller that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollUpdate {
    pub poller: PollerId,
    pub task_id: TaskId,
    pub outcome: StatusOutcome,
}

/// Repeating status check for a single task
pub struct Poller {
    id: PollerId,
    handle: TaskHandle,
    task: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling `handle`'s task every `interval`. The first request
    /// goes out one interval after start.
    pub fn start<A: JobApi>(
        id: PollerId,
        handle: TaskHandle,
        api: A,
        interval: Duration,
        updates: mpsc::UnboundedSender<PollUpdate>,
    ) -> Self {
        tracing::debug!(poller = %id, task_id = %handle.task_id, kind = %handle.kind, "starting poller");
        let task = tokio::spawn(poll_loop(
            id,
            handle.task_id.clone(),
            api,
            interval,
            updates,
        ));
        Self {
            id,
            handle,
            task: Some(task),
        }
    }

    pub fn id(&self) -> PollerId {
        self.id
    }

    pub fn handle(&self) -> &TaskHandle {
        &self.handle
    }

    /// True until stopped or until the loop has delivered a terminal outcome
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the timer. Safe to call any number of times.
    ///
    /// A request already in flight is abandoned; its response is never
    /// delivered.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(poller = %self.id, task_id = %self.handle.task_id, "poller stopped");
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("running", &self.is_running())
            .finish()
    }
}

async fn poll_loop<A: JobApi>(
    id: PollerId,
    task_id: TaskId,
    api: A,
    interval: Duration,
    updates: mpsc::UnboundedSender<PollUpdate>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    // A slow request pushes the next tick back instead of bursting
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(outcome) = tick(&api, &task_id).await else {
            continue;
        };

        let terminal = outcome.is_terminal();
        let update = PollUpdate {
            poller: id,
            task_id: task_id.clone(),
            outcome,
        };
        if updates.send(update).is_err() {
            tracing::debug!(poller = %id, "controller gone, ending poll loop");
            break;
        }
        if terminal {
            break;
        }
    }
}

/// One status request. `None` means skip this tick and try again.
async fn tick<A: JobApi>(api: &A, task_id: &TaskId) -> Option<StatusOutcome> {
    match api.task_status(task_id).await {
        Ok(report) => {
            tracing::debug!(%task_id, status = %report.status, "polled");
            Some(classify(&report.status, report.result))
        }
        Err(e @ ApiError::Rejected { .. }) => {
            tracing::warn!(%task_id, error = %e, "status check rejected, retrying next tick");
            None
        }
        Err(e) => {
            tracing::error!(%task_id, error = %e, "status check failed");
            Some(StatusOutcome::Error(POLLING_FAILED.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
