use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Port used by the fixed-workload agent.
pub const FIXED_AGENT_PORT: u16 = 5001;

/// Port used by the multi-workload agent.
pub const MULTI_AGENT_PORT: u16 = 5002;

/// Name of the definition file inside a workspace.
pub const DEFINITION_FILE_NAME: &str = "docker-compose.yml";

/// Fixed-workload agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FixedAgentConfig {
    /// Listen address (default: 0.0.0.0:5001)
    #[serde(default = "default_fixed_addr")]
    pub listen_addr: SocketAddr,

    /// Pre-placed compose definition (default: /work/docker-compose.yml)
    #[serde(default = "default_definition_path")]
    pub definition_path: PathBuf,

    /// Container runtime executable
    #[serde(default = "default_compose_program")]
    pub compose_program: String,

    #[serde(default = "default_pull_timeout_secs")]
    pub pull_timeout_secs: u64,

    /// Timeout for `up` and `down`
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Answer 500 on lifecycle failure instead of always 200.
    #[serde(default)]
    pub report_failures: bool,
}

/// Multi-workload agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MultiAgentConfig {
    /// Listen address (default: 0.0.0.0:5002)
    #[serde(default = "default_multi_addr")]
    pub listen_addr: SocketAddr,

    /// Directory holding one workspace per workload (default: /work)
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,

    /// Container runtime executable
    #[serde(default = "default_compose_program")]
    pub compose_program: String,

    #[serde(default = "default_pull_timeout_secs")]
    pub pull_timeout_secs: u64,

    /// Timeout for `up` and `down`
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

fn default_fixed_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, FIXED_AGENT_PORT))
}

fn default_multi_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, MULTI_AGENT_PORT))
}

fn default_workspace_root() -> PathBuf {
    PathBuf::from("/work")
}

fn default_definition_path() -> PathBuf {
    default_workspace_root().join(DEFINITION_FILE_NAME)
}

fn default_compose_program() -> String {
    "docker-compose".to_string()
}

fn default_pull_timeout_secs() -> u64 {
    600
}

fn default_command_timeout_secs() -> u64 {
    300
}

impl Default for FixedAgentConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_fixed_addr(),
            definition_path: default_definition_path(),
            compose_program: default_compose_program(),
            pull_timeout_secs: default_pull_timeout_secs(),
            command_timeout_secs: default_command_timeout_secs(),
            report_failures: false,
        }
    }
}

impl Default for MultiAgentConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_multi_addr(),
            workspace_root: default_workspace_root(),
            compose_program: default_compose_program(),
            pull_timeout_secs: default_pull_timeout_secs(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}
