//! Decisions and the deny taxonomy

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a permission check said no.
///
/// The order of variants mirrors the evaluator's precedence: when several
/// denials would apply, the one listed first here is the one returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    #[error("maintenance mode is active")]
    MaintenanceMode,

    #[error("dashboards are frozen")]
    Frozen,

    #[error("this feature is currently disabled")]
    FeatureDisabled,

    #[error("role does not permit this action")]
    RoleNotPermitted,

    #[error("action is outside your domain")]
    WrongDomain,

    #[error("that state transition is not allowed")]
    InvalidTransition,

    #[error("this request has already been decided")]
    AlreadyDecided,
}

/// Outcome of a permission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// Turn a denial into an error, for `?` inside the workflow engines
    pub fn require(self) -> Result<(), DenyReason> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(reason) => Err(reason),
        }
    }
}
