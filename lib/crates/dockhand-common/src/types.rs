//! Request bodies accepted by the multi-workload agent.

use serde::{Deserialize, Serialize};

/// Body of `POST /up`: the workload name and its full compose definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpRequest {
    /// Full text of the compose definition, written verbatim.
    pub file: String,
    /// Workload identifier, used as the workspace directory name.
    pub name: String,
}

/// Body of `POST /down`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownRequest {
    pub name: String,
}
