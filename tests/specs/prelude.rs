//! Shared helpers for behavioral specs

use assert_cmd::Command;
use predicates::prelude::*;
use std::ops::Deref;
use std::process::Output;
use std::time::Duration;

pub use mg_adapters::StubServer;
pub use mg_core::{EmailDraft, ResultSet};

/// Poll fast so specs finish quickly
pub const POLL_INTERVAL_MS: &str = "20";
pub const EXHAUSTED_CLEAR_MS: &str = "100";

const RUN_TIMEOUT: Duration = Duration::from_secs(20);

/// One draft per subject, each with body "Body"
pub fn drafts(subjects: &[&str]) -> ResultSet {
    ResultSet::new(
        subjects
            .iter()
            .map(|subject| EmailDraft::new(*subject, "Body"))
            .collect(),
    )
}

/// Stub job executor that `mg` is pointed at
pub struct Executor {
    stub: StubServer,
}

impl Executor {
    pub fn start() -> Self {
        Self {
            stub: StubServer::start().unwrap(),
        }
    }

    pub fn mg(&self) -> CliBuilder {
        CliBuilder::new(&self.stub.url())
    }
}

impl Deref for Executor {
    type Target = StubServer;

    fn deref(&self) -> &StubServer {
        &self.stub
    }
}

/// Base URL nothing listens on
pub fn unreachable_url() -> String {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    format!("http://{addr}")
}

/// `mg` pointed at an address nothing listens on
pub fn mg() -> CliBuilder {
    CliBuilder::new(&unreachable_url())
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    fn new(base_url: &str) -> Self {
        let mut cmd = Command::cargo_bin("mg").unwrap();
        cmd.env("MG_BASE_URL", base_url)
            .env("MG_POLL_INTERVAL_MS", POLL_INTERVAL_MS)
            .env("MG_EXHAUSTED_CLEAR_MS", EXHAUSTED_CLEAR_MS)
            .env("MG_TIMEOUT_HTTP_MS", "2000")
            .env_remove("RUST_LOG")
            .timeout(RUN_TIMEOUT);
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    fn run(mut self) -> RunAssert {
        RunAssert {
            output: self.cmd.output().unwrap(),
        }
    }

    /// Run and expect exit status 0
    pub fn passes(self) -> RunAssert {
        let run = self.run();
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status,
            run.stdout(),
            run.stderr()
        );
        run
    }

    /// Run and expect a non-zero exit status
    pub fn fails(self) -> RunAssert {
        let run = self.run();
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).to_string()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).to_string()
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            predicate::str::contains(needle).eval(&stdout),
            "stdout should contain {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(needle),
            "stdout should not contain {needle:?}:\n{stdout}"
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            predicate::str::contains(needle).eval(&stderr),
            "stderr should contain {needle:?}:\n{stderr}"
        );
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(needle),
            "stderr should not contain {needle:?}:\n{stderr}"
        );
        self
    }
}
