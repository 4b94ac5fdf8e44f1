pub mod config;
pub mod identifier;
pub mod types;

pub use config::{FixedAgentConfig, MultiAgentConfig};
pub use identifier::{IdentifierError, WorkloadId, validate_workload_id};
pub use types::*;
