//! Domain layer: pure types and the error taxonomy.
//!
//! This module has zero imports from `crate::infra`, `crate::server`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.

pub mod error;
pub mod workload;

pub use error::{CommandError, LifecycleFault, RuntimeFault, StorageError};
pub use workload::{LifecycleOutcome, Operation};
