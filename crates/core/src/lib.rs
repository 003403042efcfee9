// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mg-core: client-side lifecycle controller for server-executed email
//! generation tasks
//!
//! This crate provides:
//! - The data model exchanged with the job executor (drafts, result sets, task handles)
//! - A pure status classifier
//! - A poller bound to one task
//! - The lifecycle controller that drives the view through a generate/regenerate flow
//! - Adapter traits for the backend (`JobApi`) and the UI (`ViewSurface`)

pub mod adapters;
pub mod analysis;
pub mod config;
pub mod controller;
pub mod draft;
pub mod poller;
pub mod status;
pub mod task;

pub use adapters::{
    ApiError, Control, JobApi, RegenerationStarted, StartedTask, StatusReport, ViewSurface,
};
pub use analysis::{AnalysisId, ValidationError};
pub use config::ControllerConfig;
pub use controller::{Controller, ControllerEvent, ControllerState, LaunchOutcome, Mode};
pub use draft::{EmailDraft, ResultSet};
pub use poller::{PollUpdate, Poller, PollerId};
pub use status::{classify, StatusOutcome};
pub use task::{TaskHandle, TaskId, TaskKind};

#[cfg(any(test, feature = "test-support"))]
pub use adapters::{ApiCall, FakeJobApi, FakeView, ViewCall, ViewState};
