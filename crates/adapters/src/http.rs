// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job API over HTTP
//!
//! ureq is blocking, so each request runs on tokio's blocking pool. An
//! aborted caller leaves the request running; its response is dropped.

use async_trait::async_trait;
use mg_core::config::parse_duration_ms;
use mg_core::{
    AnalysisId, ApiError, JobApi, RegenerationStarted, StartedTask, StatusReport, TaskId,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_ENV: &str = "MG_BASE_URL";
pub const HTTP_TIMEOUT_ENV: &str = "MG_TIMEOUT_HTTP_MS";

pub const START_PATH: &str = "/start-email-generation";
pub const REGENERATE_PATH: &str = "/regenerate-email";
pub const STATUS_PATH: &str = "/task-status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
    /// Upper bound for one request, connect through body
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl HttpConfig {
    /// Defaults, overridden by `MG_BASE_URL` / `MG_TIMEOUT_HTTP_MS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var(BASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout: parse_duration_ms(HTTP_TIMEOUT_ENV).unwrap_or(defaults.timeout),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Body of both start endpoints
#[derive(Serialize)]
struct AnalysisRequest<'a> {
    analysis_id: &'a AnalysisId,
}

/// `JobApi` backed by the executor's HTTP endpoints
#[derive(Clone)]
pub struct HttpJobApi {
    agent: ureq::Agent,
    base_url: Arc<str>,
}

impl HttpJobApi {
    pub fn new(config: &HttpConfig) -> Self {
        let agent_config = ureq::Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(agent_config),
            base_url: config.base_url.trim().trim_end_matches('/').into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_analysis<T>(&self, path: &str, analysis_id: &AnalysisId) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let payload = serde_json::to_string(&AnalysisRequest { analysis_id })
            .map_err(|e| ApiError::Transport(format!("failed to encode request: {e}")))?;
        self.execute(self.url(path), Some(payload)).await
    }

    async fn execute<T>(&self, url: String, payload: Option<String>) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || {
            let response = match payload {
                Some(payload) => agent
                    .post(url.as_str())
                    .header("Content-Type", "application/json")
                    .send(payload.as_str()),
                None => agent.get(url.as_str()).call(),
            };
            decode(response)
        })
        .await
        .map_err(|e| ApiError::Transport(format!("request task failed: {e}")))?
    }
}

fn decode<T: DeserializeOwned>(
    response: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<T, ApiError> {
    let mut response = response.map_err(|e| match e {
        ureq::Error::StatusCode(status) => ApiError::Rejected { status },
        other => ApiError::Transport(other.to_string()),
    })?;

    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(format!("failed to read response: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl JobApi for HttpJobApi {
    async fn start_generation(&self, analysis_id: &AnalysisId) -> Result<StartedTask, ApiError> {
        self.post_analysis(START_PATH, analysis_id).await
    }

    async fn regenerate(
        &self,
        analysis_id: &AnalysisId,
    ) -> Result<RegenerationStarted, ApiError> {
        self.post_analysis(REGENERATE_PATH, analysis_id).await
    }

    async fn task_status(&self, task_id: &TaskId) -> Result<StatusReport, ApiError> {
        self.execute(self.url(&format!("{STATUS_PATH}/{task_id}")), None)
            .await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
