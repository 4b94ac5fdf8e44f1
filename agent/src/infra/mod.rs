//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! compose CLI adapter and workspace filesystem access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::server` are forbidden.

pub mod command_runner;
pub mod compose;
pub mod fs;

pub use command_runner::TokioCommandRunner;
pub use compose::ComposeCli;
pub use fs::LocalWorkspaceStore;
