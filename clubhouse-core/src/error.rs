//! Error types for clubhouse-core

use thiserror::Error;

use crate::authz::DenyReason;
use crate::config::ConfigError;
use crate::flags::FlagError;
use crate::session::AuthError;
use crate::store::{IntegrityError, PersistError};

/// Top-level error type for clubhouse-core
#[derive(Error, Debug)]
pub enum ClubError {
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("flag error: {0}")]
    Flag(#[from] FlagError),

    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    #[error("persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the workflow engines.
///
/// `Denied` carries the evaluator's verdict; the record-level variants
/// cover lookups and domain validation that happen after authorization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("permission denied: {0}")]
    Denied(#[from] DenyReason),

    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("content not found: {0}")]
    ContentNotFound(String),

    #[error("join request not found: {0}")]
    RequestNotFound(String),

    #[error("member not found: {0}")]
    MemberNotFound(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("event is at capacity: {0}")]
    EventFull(String),

    #[error("member {member} is not assigned to task {task}")]
    NotAssigned { task: String, member: String },
}

impl WorkflowError {
    /// The evaluator verdict behind this error, if it was a denial
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            WorkflowError::Denied(reason) => Some(*reason),
            _ => None,
        }
    }
}
