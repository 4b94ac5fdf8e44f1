//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error`. Which of them are surfaced
//! to a caller is decided by `crate::server::error`.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::workload::Operation;

// ── Process execution ─────────────────────────────────────────────────────────

/// Failure to run an external program to completion.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} timed out after {}s", .after.as_secs())]
    TimedOut { program: String, after: Duration },
}

// ── Container runtime ─────────────────────────────────────────────────────────

/// A single runtime invocation that did not succeed.
#[derive(Debug, Error)]
pub enum RuntimeFault {
    #[error("{program} {operation} exited with {status}: {stderr}")]
    Exited {
        program: String,
        operation: Operation,
        status: String,
        stderr: String,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl RuntimeFault {
    /// The timeout that expired, if this fault is a timeout.
    #[must_use]
    pub fn timed_out_after(&self) -> Option<Duration> {
        match self {
            Self::Command(CommandError::TimedOut { after, .. }) => Some(*after),
            _ => None,
        }
    }
}

// ── Workspace storage ─────────────────────────────────────────────────────────

/// StorageFault: workspace directory or definition file I/O failed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not create the {} directory: {source}", .path.display())]
    CreateWorkspace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write {}: {source}", .path.display())]
    WriteDefinition {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("storage task failed: {0}")]
    Task(String),
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Terminal failure of a bring-up or bring-down.
#[derive(Debug, Error)]
pub enum LifecycleFault {
    /// StartFault: `up` did not succeed.
    #[error("Could not start the workload from {}: {source}", .definition.display())]
    StartFailed {
        definition: PathBuf,
        #[source]
        source: RuntimeFault,
    },

    /// StopFault: `down` did not succeed.
    #[error("Could not stop the workload from {}: {source}", .definition.display())]
    StopFailed {
        definition: PathBuf,
        #[source]
        source: RuntimeFault,
    },

    #[error("{operation} of {} timed out after {}s", .definition.display(), .after.as_secs())]
    Timeout {
        operation: Operation,
        definition: PathBuf,
        after: Duration,
    },
}
