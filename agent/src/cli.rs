//! CLI argument parsing with clap derive, and agent assembly.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dockhand_common::{FixedAgentConfig, MultiAgentConfig};

use crate::infra::{ComposeCli, LocalWorkspaceStore, TokioCommandRunner};
use crate::server::{self, fixed::FixedAgent, multi::MultiAgent};

/// Prefix of every configuration environment variable.
pub const ENV_PREFIX: &str = "DOCKHAND_";

/// HTTP-triggered docker-compose agents
#[derive(Parser)]
#[command(
    name = "dockhand",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage the single pre-placed definition (DOCKHAND_DEFINITION_PATH)
    Fixed(ServeArgs),

    /// Accept definitions over HTTP, one workspace per workload name
    Multi(ServeArgs),
}

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Listen address, overriding DOCKHAND_LISTEN_ADDR
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}

impl Cli {
    /// Load configuration from the environment and run the selected agent.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Fixed(args) => {
                let mut config: FixedAgentConfig = envy::prefixed(ENV_PREFIX)
                    .from_env()
                    .context("failed to load config from DOCKHAND_* env vars")?;
                if let Some(listen) = args.listen {
                    config.listen_addr = listen;
                }
                run_fixed(config).await
            }
            Command::Multi(args) => {
                let mut config: MultiAgentConfig = envy::prefixed(ENV_PREFIX)
                    .from_env()
                    .context("failed to load config from DOCKHAND_* env vars")?;
                if let Some(listen) = args.listen {
                    config.listen_addr = listen;
                }
                run_multi(config).await
            }
        }
    }
}

fn compose_runtime(
    program: &str,
    command_timeout: u64,
    pull_timeout: u64,
) -> ComposeCli<TokioCommandRunner> {
    ComposeCli::new(TokioCommandRunner::new(Duration::from_secs(command_timeout)))
        .with_program(program)
        .with_pull_timeout(Duration::from_secs(pull_timeout))
}

async fn run_fixed(config: FixedAgentConfig) -> Result<()> {
    tracing::info!(
        listen_addr = %config.listen_addr,
        definition = %config.definition_path.display(),
        program = %config.compose_program,
        report_failures = config.report_failures,
        "starting fixed-workload agent",
    );
    if !config.definition_path.is_file() {
        tracing::warn!(
            definition = %config.definition_path.display(),
            "definition not found; bring-up will fail until it is placed"
        );
    }

    let runtime = compose_runtime(
        &config.compose_program,
        config.command_timeout_secs,
        config.pull_timeout_secs,
    );
    let agent = FixedAgent::new(runtime, config.definition_path)
        .report_failures(config.report_failures);
    let router = server::with_common_routes(server::fixed::router(Arc::new(agent)));
    server::serve(router, config.listen_addr).await
}

async fn run_multi(config: MultiAgentConfig) -> Result<()> {
    tracing::info!(
        listen_addr = %config.listen_addr,
        workspace_root = %config.workspace_root.display(),
        program = %config.compose_program,
        "starting multi-workload agent",
    );

    let store = LocalWorkspaceStore::new(config.workspace_root);
    store
        .init()
        .await
        .context("failed to prepare the workspace root")?;

    let runtime = compose_runtime(
        &config.compose_program,
        config.command_timeout_secs,
        config.pull_timeout_secs,
    );
    let agent = MultiAgent::new(runtime, store);
    let router = server::with_common_routes(server::multi::router(Arc::new(agent)));
    server::serve(router, config.listen_addr).await
}
