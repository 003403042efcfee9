// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable stand-in for the job executor's HTTP endpoints
//!
//! Runs an axum server on its own thread so both async tests and tests
//! that spawn the `mg` binary can talk to it. Responses follow the same
//! script rules as the in-memory fake: status scripts are consumed in
//! order and the last entry for a task keeps being served.
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::http::{REGENERATE_PATH, START_PATH, STATUS_PATH};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use mg_core::status::COMPLETED;
use mg_core::{ResultSet, StatusReport};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

/// Request received by the stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

impl StubRequest {
    /// Request body parsed as JSON, if it is JSON
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

#[derive(Debug, Clone)]
struct StubResponse {
    status: u16,
    body: String,
}

impl StubResponse {
    fn ok(value: &impl Serialize) -> Self {
        Self {
            status: 200,
            body: serde_json::to_string(value).unwrap_or_default(),
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            body: r#"{"error":"scripted failure"}"#.to_string(),
        }
    }
}

#[derive(Default)]
struct StubState {
    requests: Vec<StubRequest>,
    starts: VecDeque<StubResponse>,
    regenerations: VecDeque<StubResponse>,
    statuses: HashMap<String, VecDeque<StubResponse>>,
}

impl StubState {
    fn record(&mut self, method: &str, path: String, body: &Bytes) {
        self.requests.push(StubRequest {
            method: method.to_string(),
            path,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
}

type SharedState = Arc<Mutex<StubState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, StubState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// HTTP stub of the job executor, shut down on drop
pub struct StubServer {
    addr: SocketAddr,
    state: SharedState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    /// Bind an ephemeral local port and start serving
    pub fn start() -> std::io::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let state = SharedState::default();
        let app = router(state.clone());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::Builder::new()
            .name("mg-stub-server".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = match tokio::net::TcpListener::from_std(listener) {
                        Ok(listener) => listener,
                        Err(e) => {
                            tracing::error!(error = %e, "stub server listener failed");
                            return;
                        }
                    };
                    let server = axum::serve(listener, app).with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    });
                    if let Err(e) = server.await {
                        tracing::error!(error = %e, "stub server failed");
                    }
                });
            })?;

        tracing::debug!(%addr, "stub server listening");
        Ok(Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        })
    }

    /// Base URL to hand to `HttpConfig` or `MG_BASE_URL`
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Accept the next start request with the given task id
    pub fn accept_start(&self, task_id: &str) {
        lock(&self.state)
            .starts
            .push_back(StubResponse::ok(&serde_json::json!({ "task_id": task_id })));
    }

    /// Answer the next start request with a non-2xx status
    pub fn reject_start(&self, status: u16) {
        lock(&self.state)
            .starts
            .push_back(StubResponse::status(status));
    }

    /// Accept the next regenerate request
    pub fn accept_regenerate(&self, task_id: &str, model_used: &str) {
        lock(&self.state).regenerations.push_back(StubResponse::ok(
            &serde_json::json!({ "task_id": task_id, "model_used": model_used }),
        ));
    }

    /// Answer the next regenerate request with a non-2xx status
    pub fn reject_regenerate(&self, status: u16) {
        lock(&self.state)
            .regenerations
            .push_back(StubResponse::status(status));
    }

    /// Queue a status string for a task
    pub fn push_status(&self, task_id: &str, status: &str) {
        self.push(task_id, StubResponse::ok(&StatusReport::new(status)));
    }

    /// Queue a completed status carrying a result set
    pub fn push_completed(&self, task_id: &str, results: &ResultSet) {
        let report = StatusReport::new(COMPLETED).with_result(results.clone());
        self.push(task_id, StubResponse::ok(&report));
    }

    /// Queue a non-2xx answer to a status request
    pub fn push_status_code(&self, task_id: &str, status: u16) {
        self.push(task_id, StubResponse::status(status));
    }

    /// Queue a 200 answer with an arbitrary body
    pub fn push_raw_status(&self, task_id: &str, body: &str) {
        self.push(
            task_id,
            StubResponse {
                status: 200,
                body: body.to_string(),
            },
        );
    }

    fn push(&self, task_id: &str, response: StubResponse) {
        lock(&self.state)
            .statuses
            .entry(task_id.to_string())
            .or_default()
            .push_back(response);
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<StubRequest> {
        lock(&self.state).requests.clone()
    }

    /// Number of status requests received for a task
    pub fn status_requests(&self, task_id: &str) -> usize {
        let path = format!("{STATUS_PATH}/{task_id}");
        lock(&self.state)
            .requests
            .iter()
            .filter(|request| request.path == path)
            .count()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route(START_PATH, post(start_generation))
        .route(REGENERATE_PATH, post(regenerate))
        .route(&format!("{STATUS_PATH}/{{task_id}}"), get(task_status))
        .with_state(state)
}

fn respond(response: StubResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response()
}

async fn start_generation(State(state): State<SharedState>, body: Bytes) -> Response {
    let mut state = lock(&state);
    state.record("POST", START_PATH.to_string(), &body);
    respond(
        state
            .starts
            .pop_front()
            .unwrap_or_else(|| StubResponse::status(500)),
    )
}

async fn regenerate(State(state): State<SharedState>, body: Bytes) -> Response {
    let mut state = lock(&state);
    state.record("POST", REGENERATE_PATH.to_string(), &body);
    respond(
        state
            .regenerations
            .pop_front()
            .unwrap_or_else(|| StubResponse::status(500)),
    )
}

async fn task_status(State(state): State<SharedState>, Path(task_id): Path<String>) -> Response {
    let mut state = lock(&state);
    state.record("GET", format!("{STATUS_PATH}/{task_id}"), &Bytes::new());
    let response = match state.statuses.get_mut(&task_id) {
        Some(script) if script.len() > 1 => script.pop_front(),
        Some(script) => script.front().cloned(),
        None => None,
    };
    respond(response.unwrap_or_else(|| StubResponse::status(404)))
}
