//! Lifecycle outcome and operation names.

use std::fmt;

use crate::domain::error::LifecycleFault;

/// One runtime operation against a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Pull,
    Up,
    Down,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pull => "pull",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single bring-up or bring-down. Never persisted.
#[derive(Debug)]
pub enum LifecycleOutcome {
    Success,
    /// The workload is running but a non-fatal step (image pull) failed.
    PartialFailure(String),
    Failure(LifecycleFault),
}

impl LifecycleOutcome {
    /// `true` for `Success` and `PartialFailure`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure(_))
    }

    /// Collapse into a `Result`, keeping any partial-failure reason.
    pub fn into_result(self) -> Result<Option<String>, LifecycleFault> {
        match self {
            Self::Success => Ok(None),
            Self::PartialFailure(reason) => Ok(Some(reason)),
            Self::Failure(fault) => Err(fault),
        }
    }
}
