//! Workload identifiers.
//!
//! An identifier names a workload and doubles as its workspace directory
//! name, so it must always be a single, non-traversing path segment.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Longest identifier accepted.
pub const MAX_WORKLOAD_ID_LEN: usize = 128;

/// First character alphanumeric, then alphanumerics, `.`, `_` or `-`.
/// Rejects `.`, `..`, separators and NUL before any path is built (CWE-22).
static WORKLOAD_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern, cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex")
});

/// Reasons an identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("workload name must not be empty")]
    Empty,

    #[error("workload name is longer than {MAX_WORKLOAD_ID_LEN} characters")]
    TooLong,

    #[error(
        "invalid workload name '{0}': must start with a letter or digit and contain only letters, digits, '.', '_' or '-'"
    )]
    InvalidCharacters(String),
}

/// Validate that `name` is usable as a workload identifier.
pub fn validate_workload_id(name: &str) -> Result<(), IdentifierError> {
    if name.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if name.len() > MAX_WORKLOAD_ID_LEN {
        return Err(IdentifierError::TooLong);
    }
    if !WORKLOAD_ID_RE.is_match(name) {
        return Err(IdentifierError::InvalidCharacters(name.to_string()));
    }
    Ok(())
}

/// A validated workload identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkloadId(String);

impl WorkloadId {
    pub fn parse(name: &str) -> Result<Self, IdentifierError> {
        validate_workload_id(name)?;
        Ok(Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WorkloadId {
    type Error = IdentifierError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        validate_workload_id(&name)?;
        Ok(Self(name))
    }
}
