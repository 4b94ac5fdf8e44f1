//! Lifecycle driver: brings a workload up or down through the runtime port.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use crate::application::ports::ContainerRuntime;
use crate::domain::{LifecycleFault, LifecycleOutcome, Operation, RuntimeFault};

/// Drives bring-up and bring-down against a `ContainerRuntime`.
///
/// The driver holds no per-workload state; callers serialise operations on
/// the same workload with [`super::WorkloadLocks`].
pub struct LifecycleDriver<R> {
    runtime: R,
}

impl<R: ContainerRuntime> LifecycleDriver<R> {
    #[must_use]
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    #[must_use]
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Pull images (best-effort), then start with forced recreation.
    ///
    /// Only a failed start is fatal. A failed pull followed by a successful
    /// start yields `PartialFailure`, which counts as success.
    pub async fn bring_up(&self, definition: &Path) -> LifecycleOutcome {
        let pull_fault = match self.runtime.pull(definition).await {
            Ok(()) => None,
            Err(fault) => {
                tracing::warn!(
                    definition = %definition.display(),
                    error = %fault,
                    "image pull failed, continuing with start"
                );
                Some(fault)
            }
        };

        if let Err(fault) = self.runtime.up(definition).await {
            tracing::error!(definition = %definition.display(), error = %fault, "start failed");
            return LifecycleOutcome::Failure(classify(Operation::Up, definition, fault));
        }

        tracing::info!(definition = %definition.display(), "workload started");
        match pull_fault {
            None => LifecycleOutcome::Success,
            Some(fault) => LifecycleOutcome::PartialFailure(format!("image pull failed: {fault}")),
        }
    }

    /// Stop and remove the workload.
    ///
    /// There is no existence check: a definition that was never started (or
    /// never written) fails only if the runtime itself reports failure.
    pub async fn bring_down(&self, definition: &Path) -> LifecycleOutcome {
        match self.runtime.down(definition).await {
            Ok(()) => {
                tracing::info!(definition = %definition.display(), "workload stopped");
                LifecycleOutcome::Success
            }
            Err(fault) => {
                tracing::error!(definition = %definition.display(), error = %fault, "stop failed");
                LifecycleOutcome::Failure(classify(Operation::Down, definition, fault))
            }
        }
    }
}

fn classify(operation: Operation, definition: &Path, fault: RuntimeFault) -> LifecycleFault {
    let definition = definition.to_path_buf();
    if let Some(after) = fault.timed_out_after() {
        return LifecycleFault::Timeout {
            operation,
            definition,
            after,
        };
    }
    match operation {
        Operation::Down => LifecycleFault::StopFailed {
            definition,
            source: fault,
        },
        Operation::Pull | Operation::Up => LifecycleFault::StartFailed {
            definition,
            source: fault,
        },
    }
}
