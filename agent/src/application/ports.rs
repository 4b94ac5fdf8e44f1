//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! Futures are `Send` so services built on them can run inside axum handlers.

use std::future::Future;
use std::path::Path;
use std::process::Output;
use std::time::Duration;

use crate::domain::{CommandError, RuntimeFault};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
pub trait CommandRunner: Send + Sync + 'static {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    fn run(
        &self,
        program: &str,
        args: &[&str],
    ) -> impl Future<Output = Result<Output, CommandError>> + Send;

    /// Run a program with a custom timeout override.
    ///
    /// On timeout, the child process must be killed (not left orphaned) and
    /// `CommandError::TimedOut` returned.
    fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> impl Future<Output = Result<Output, CommandError>> + Send;
}

// ── Container Runtime Port ────────────────────────────────────────────────────

/// The container-orchestration runtime, addressed by definition file.
///
/// Each call is one black-box invocation: `Ok(())` when the runtime reports
/// success, `RuntimeFault` otherwise.
pub trait ContainerRuntime: Send + Sync + 'static {
    /// Pull the images referenced by the definition.
    fn pull(&self, definition: &Path) -> impl Future<Output = Result<(), RuntimeFault>> + Send;

    /// Start the workload detached, recreating existing containers.
    fn up(&self, definition: &Path) -> impl Future<Output = Result<(), RuntimeFault>> + Send;

    /// Stop and remove the workload's containers and networks.
    fn down(&self, definition: &Path) -> impl Future<Output = Result<(), RuntimeFault>> + Send;
}
