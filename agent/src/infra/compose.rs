//! `ContainerRuntime` backed by the docker-compose command line.
//!
//! Argument shapes are fixed:
//!   - `-f <definition> pull --ignore-pull-failures`
//!   - `-f <definition> up -d --force-recreate`
//!   - `-f <definition> down`

use std::path::Path;
use std::time::Duration;

use crate::application::ports::{CommandRunner, ContainerRuntime};
use crate::domain::{Operation, RuntimeFault};

/// Default runtime executable.
pub const COMPOSE_PROGRAM: &str = "docker-compose";

/// Default limit for image pulls.
pub const DEFAULT_PULL_TIMEOUT: Duration = Duration::from_secs(600);

/// Runs the compose CLI through a `CommandRunner`.
///
/// `up` and `down` use the runner's default timeout; `pull` has its own.
pub struct ComposeCli<C> {
    runner: C,
    program: String,
    pull_timeout: Duration,
}

impl<C: CommandRunner> ComposeCli<C> {
    #[must_use]
    pub fn new(runner: C) -> Self {
        Self {
            runner,
            program: COMPOSE_PROGRAM.to_string(),
            pull_timeout: DEFAULT_PULL_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    #[must_use]
    pub fn with_pull_timeout(mut self, timeout: Duration) -> Self {
        self.pull_timeout = timeout;
        self
    }

    #[must_use]
    pub fn runner(&self) -> &C {
        &self.runner
    }

    async fn invoke(
        &self,
        operation: Operation,
        definition: &Path,
        extra: &[&str],
        timeout: Option<Duration>,
    ) -> Result<(), RuntimeFault> {
        let file = definition.to_string_lossy();
        let mut args = vec!["-f", &*file, operation.as_str()];
        args.extend_from_slice(extra);

        let output = match timeout {
            Some(timeout) => {
                self.runner
                    .run_with_timeout(&self.program, &args, timeout)
                    .await?
            }
            None => self.runner.run(&self.program, &args).await?,
        };

        if output.status.success() {
            return Ok(());
        }

        Err(RuntimeFault::Exited {
            program: self.program.clone(),
            operation,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl<C: CommandRunner> ContainerRuntime for ComposeCli<C> {
    async fn pull(&self, definition: &Path) -> Result<(), RuntimeFault> {
        self.invoke(
            Operation::Pull,
            definition,
            &["--ignore-pull-failures"],
            Some(self.pull_timeout),
        )
        .await
    }

    async fn up(&self, definition: &Path) -> Result<(), RuntimeFault> {
        self.invoke(Operation::Up, definition, &["-d", "--force-recreate"], None)
            .await
    }

    async fn down(&self, definition: &Path) -> Result<(), RuntimeFault> {
        self.invoke(Operation::Down, definition, &[], None).await
    }
}
