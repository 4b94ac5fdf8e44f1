//! Shared test helpers: stub runtimes, a recording command runner and HTTP
//! request constructors.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use dockhand::application::ports::{CommandRunner, ContainerRuntime};
use dockhand::domain::{CommandError, Operation, RuntimeFault};

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

pub fn ok_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── Stub container runtime ───────────────────────────────────────────────────

/// How the stub answers each operation.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum Answer {
    #[default]
    Ok,
    Fail,
    TimeOut,
}

/// In-memory runtime that tracks which definitions are "running".
///
/// `down` fails when the definition file does not exist, the way the compose
/// CLI does.
#[derive(Default)]
pub struct StubRuntime {
    pub pull: Answer,
    pub up: Answer,
    pub down: Answer,
    /// Time each `up` takes.
    pub up_delay: Duration,
    pub(crate) calls: Mutex<Vec<(Operation, PathBuf)>>,
    pub(crate) running: Mutex<HashSet<PathBuf>>,
    pub(crate) in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
}

impl StubRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_pull() -> Self {
        Self {
            pull: Answer::Fail,
            ..Self::default()
        }
    }

    pub fn failing_up() -> Self {
        Self {
            up: Answer::Fail,
            ..Self::default()
        }
    }

    pub fn slow_up(delay: Duration) -> Self {
        Self {
            up_delay: delay,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(Operation, PathBuf)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls().into_iter().map(|(op, _)| op).collect()
    }

    pub fn running(&self) -> usize {
        self.running.lock().expect("running lock").len()
    }

    pub fn is_running(&self, definition: &Path) -> bool {
        self.running.lock().expect("running lock").contains(definition)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, operation: Operation, definition: &Path) {
        self.calls
            .lock()
            .expect("calls lock")
            .push((operation, definition.to_path_buf()));
    }

    fn answer(answer: Answer, operation: Operation) -> Result<(), RuntimeFault> {
        match answer {
            Answer::Ok => Ok(()),
            Answer::Fail => Err(exited(operation, "simulated failure")),
            Answer::TimeOut => Err(RuntimeFault::Command(CommandError::TimedOut {
                program: "docker-compose".into(),
                after: Duration::from_secs(1),
            })),
        }
    }
}

pub fn exited(operation: Operation, stderr: &str) -> RuntimeFault {
    RuntimeFault::Exited {
        program: "docker-compose".into(),
        operation,
        status: "exit status: 1".into(),
        stderr: stderr.into(),
    }
}

impl ContainerRuntime for StubRuntime {
    async fn pull(&self, definition: &Path) -> Result<(), RuntimeFault> {
        self.record(Operation::Pull, definition);
        Self::answer(self.pull, Operation::Pull)
    }

    async fn up(&self, definition: &Path) -> Result<(), RuntimeFault> {
        self.record(Operation::Up, definition);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.up_delay.is_zero() {
            tokio::time::sleep(self.up_delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Self::answer(self.up, Operation::Up)?;
        // Forced recreation: replacing an instance never adds a second one.
        self.running
            .lock()
            .expect("running lock")
            .insert(definition.to_path_buf());
        Ok(())
    }

    async fn down(&self, definition: &Path) -> Result<(), RuntimeFault> {
        self.record(Operation::Down, definition);
        Self::answer(self.down, Operation::Down)?;
        if !definition.is_file() && !self.is_running(definition) {
            return Err(exited(
                Operation::Down,
                "Can't find a suitable configuration file",
            ));
        }
        self.running.lock().expect("running lock").remove(definition);
        Ok(())
    }
}

// ── Recording command runner ─────────────────────────────────────────────────

/// One recorded invocation: program, args and the timeout override (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

/// Records every invocation and answers with a canned result.
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    reply: fn() -> Result<Output, CommandError>,
}

impl RecordingRunner {
    pub fn new(reply: fn() -> Result<Output, CommandError>) -> Self {
        Self {
            invocations: Mutex::new(Vec::new()),
            reply,
        }
    }

    pub fn succeeding() -> Self {
        Self::new(|| Ok(ok_output()))
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().expect("invocations lock").clone()
    }

    fn record(&self, program: &str, args: &[&str], timeout: Option<Duration>) {
        self.invocations
            .lock()
            .expect("invocations lock")
            .push(Invocation {
                program: program.to_string(),
                args: args.iter().map(ToString::to_string).collect(),
                timeout,
            });
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output, CommandError> {
        self.record(program, args, None);
        (self.reply)()
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output, CommandError> {
        self.record(program, args, Some(timeout));
        (self.reply)()
    }
}

// ── HTTP helpers ─────────────────────────────────────────────────────────────

pub fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn status_and_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}
