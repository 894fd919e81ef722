//! Authentication failures

use thiserror::Error;

use crate::role::Role;

/// Why a login attempt was refused.
///
/// `LoginsSuspended` takes precedence over `InvalidCredentials`: when the
/// emergency switch is on, callers learn that logins are closed, not whether
/// their secret was right.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no account for email: {0}")]
    UnknownIdentity(String),

    #[error("logins are temporarily suspended")]
    LoginsSuspended,

    #[error("no account provisioned for role: {0}")]
    NoAccountForRole(Role),
}
