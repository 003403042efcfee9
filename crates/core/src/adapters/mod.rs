// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter traits for the job executor and the view, plus in-memory fakes

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod traits;

// Re-export traits
pub use traits::{
    ApiError, Control, JobApi, RegenerationStarted, StartedTask, StatusReport, ViewSurface,
};

// Re-export fake adapters
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCall, FakeJobApi, FakeView, ViewCall, ViewState};
