//! Durable snapshots, seed data, and load-time integrity checks

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::ContentItem;
use crate::domain::Domain;
use crate::events::Event;
use crate::flags::FeatureFlags;
use crate::membership::{JoinRequest, JoinStatus, Member};
use crate::role::Role;
use crate::session::Account;
use crate::tasks::Task;

/// Referential-integrity violations found while loading state.
///
/// Raised before any of the offending data reaches the store; a process
/// never starts on a broken record set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("duplicate id in {collection}: {id}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("{referrer} references unknown domain: {domain}")]
    UnknownDomain { referrer: String, domain: String },

    #[error("account {email} holds role {role} but no domain")]
    MissingDomain { email: String, role: Role },

    #[error("account {email} holds domainless role {role} but carries a domain")]
    UnexpectedDomain { email: String, role: Role },

    #[error("approved request {request} records no member")]
    MissingMemberLink { request: String },

    #[error("request {request} points at missing member: {member}")]
    DanglingMember { request: String, member: String },

    #[error("task {task} references missing member: {member}")]
    DanglingAssignee { task: String, member: String },
}

/// The durable record set: everything that survives a restart.
///
/// Flat collections, serialized as-is; the domain catalog is deliberately
/// absent because it ships with the build, not with user state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub flags: FeatureFlags,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
    #[serde(default)]
    pub join_requests: Vec<JoinRequest>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Startup input: the domain catalog plus an initial record set.
///
/// Read once at construction; afterwards state changes only through the
/// workflow engines.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub domains: Vec<Domain>,
    pub state: Snapshot,
}

impl SeedData {
    pub fn new(domains: Vec<Domain>, state: Snapshot) -> Self {
        Self { domains, state }
    }

    /// Check every cross-reference in `state` against the catalog and
    /// against itself. Returns the first violation found.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        validate(&self.domains, &self.state)
    }
}

/// Validate a record set against a domain catalog
pub(crate) fn validate(domains: &[Domain], state: &Snapshot) -> Result<(), IntegrityError> {
    let domain_ids: HashSet<&str> = domains.iter().map(|d| d.id.as_str()).collect();
    let known_domain = |id: &str| domain_ids.contains(id);

    let mut seen = HashSet::new();
    for domain in domains {
        if !seen.insert(domain.id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "domains",
                id: domain.id.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for account in &state.accounts {
        if !seen.insert(account.email.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "accounts",
                id: account.email.clone(),
            });
        }
        match (&account.domain, account.role.requires_domain()) {
            (None, true) => {
                return Err(IntegrityError::MissingDomain {
                    email: account.email.clone(),
                    role: account.role,
                });
            }
            (Some(_), false) => {
                return Err(IntegrityError::UnexpectedDomain {
                    email: account.email.clone(),
                    role: account.role,
                });
            }
            (Some(domain), true) if !known_domain(domain) => {
                return Err(IntegrityError::UnknownDomain {
                    referrer: format!("account {}", account.email),
                    domain: domain.clone(),
                });
            }
            _ => {}
        }
    }

    let mut seen = HashSet::new();
    for item in &state.content {
        if !seen.insert(item.slug.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "content",
                id: item.slug.clone(),
            });
        }
        if let Some(domain) = &item.domain {
            if !known_domain(domain) {
                return Err(IntegrityError::UnknownDomain {
                    referrer: format!("content {}", item.slug),
                    domain: domain.clone(),
                });
            }
        }
    }

    let member_ids: HashSet<&str> = state.members.iter().map(|m| m.id.as_str()).collect();

    let mut seen = HashSet::new();
    for member in &state.members {
        if !seen.insert(member.id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "members",
                id: member.id.clone(),
            });
        }
        if !known_domain(&member.domain) {
            return Err(IntegrityError::UnknownDomain {
                referrer: format!("member {}", member.id),
                domain: member.domain.clone(),
            });
        }
    }

    let mut seen = HashSet::new();
    for request in &state.join_requests {
        if !seen.insert(request.id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "join_requests",
                id: request.id.clone(),
            });
        }
        if !known_domain(&request.domain) {
            return Err(IntegrityError::UnknownDomain {
                referrer: format!("request {}", request.id),
                domain: request.domain.clone(),
            });
        }
        match (&request.status, &request.member_id) {
            (JoinStatus::Approved, None) => {
                return Err(IntegrityError::MissingMemberLink {
                    request: request.id.clone(),
                });
            }
            (_, Some(member_id)) if !member_ids.contains(member_id.as_str()) => {
                return Err(IntegrityError::DanglingMember {
                    request: request.id.clone(),
                    member: member_id.clone(),
                });
            }
            _ => {}
        }
    }

    let mut seen = HashSet::new();
    for task in &state.tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "tasks",
                id: task.id.clone(),
            });
        }
        if !known_domain(&task.domain) {
            return Err(IntegrityError::UnknownDomain {
                referrer: format!("task {}", task.id),
                domain: task.domain.clone(),
            });
        }
        for member_id in task.assigned_to.iter().chain(
            task.submissions.iter().map(|s| &s.member_id),
        ) {
            if !member_ids.contains(member_id.as_str()) {
                return Err(IntegrityError::DanglingAssignee {
                    task: task.id.clone(),
                    member: member_id.clone(),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for event in &state.events {
        if !seen.insert(event.id.as_str()) {
            return Err(IntegrityError::DuplicateId {
                collection: "events",
                id: event.id.clone(),
            });
        }
        if let Some(domain) = &event.domain {
            if !known_domain(domain) {
                return Err(IntegrityError::UnknownDomain {
                    referrer: format!("event {}", event.id),
                    domain: domain.clone(),
                });
            }
        }
    }

    Ok(())
}
