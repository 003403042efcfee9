// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use async_trait::async_trait;
use mg_core::{
    AnalysisId, ApiError, JobApi, RegenerationStarted, StartedTask, StatusReport, TaskId,
};
use tracing::Instrument;

/// Wrapper that adds tracing to any JobApi
#[derive(Clone)]
pub struct TracedJobApi<A> {
    inner: A,
}

impl<A> TracedJobApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A: JobApi> JobApi for TracedJobApi<A> {
    async fn start_generation(&self, analysis_id: &AnalysisId) -> Result<StartedTask, ApiError> {
        let span = tracing::info_span!("job_api.start", %analysis_id);

        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.start_generation(analysis_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(started) => tracing::info!(
                    task_id = %started.task_id,
                    elapsed_ms,
                    "task accepted"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn regenerate(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<RegenerationStarted, ApiError> {
        let span = tracing::info_span!("job_api.regenerate", %analysis_id);

        async {
            tracing::info!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.regenerate(analysis_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(started) => tracing::info!(
                    task_id = %started.task_id,
                    model_used = %started.model_used,
                    elapsed_ms,
                    "task accepted"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "regenerate failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn task_status(&self, task_id: &TaskId) -> Result<StatusReport, ApiError> {
        let span = tracing::debug_span!("job_api.status", %task_id);

        async {
            let start = std::time::Instant::now();
            let result = self.inner.task_status(task_id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            // Non-2xx answers are routine while a task is starting up
            match &result {
                Ok(report) => tracing::debug!(status = %report.status, elapsed_ms, "checked"),
                Err(e) if e.is_transient() => {
                    tracing::warn!(elapsed_ms, error = %e, "status check rejected")
                }
                Err(e) => tracing::error!(elapsed_ms, error = %e, "status check failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
