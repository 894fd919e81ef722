//! Identities and the accounts they are minted from

use serde::{Deserialize, Serialize};

use crate::domain::DomainId;
use crate::role::Role;

/// Authenticated principal carried through every permission check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable account id this identity was minted from
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email, unique across accounts
    pub email: String,
    /// Role held at login time
    pub role: Role,
    /// Domain affiliation, `None` for domainless roles
    pub domain: Option<DomainId>,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        domain: Option<DomainId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
            domain,
        }
    }

    /// Whether this identity carries the root override
    pub fn is_dev(&self) -> bool {
        self.role == Role::Dev
    }

    /// Whether this identity is affiliated with the given domain
    pub fn in_domain(&self, domain: &str) -> bool {
        self.domain.as_deref() == Some(domain)
    }
}

/// Stored login record. The secret never leaves this struct; sessions carry
/// an [`Identity`] projection instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Login secret, compared verbatim at login
    pub secret: String,
    pub role: Role,
    pub domain: Option<DomainId>,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
        role: Role,
        domain: Option<DomainId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            secret: secret.into(),
            role,
            domain,
        }
    }

    /// Project the secret-free identity for this account
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            domain: self.domain.clone(),
        }
    }
}
