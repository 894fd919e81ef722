//! Join requests and member records

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::DomainId;

/// Lifecycle of a join request. Approved and Rejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStatus {
    Pending,
    Approved,
    Rejected,
}

impl JoinStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JoinStatus::Pending)
    }
}

impl fmt::Display for JoinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            JoinStatus::Pending => "pending",
            JoinStatus::Approved => "approved",
            JoinStatus::Rejected => "rejected",
        };
        f.write_str(tag)
    }
}

/// An application to join the club, submitted from the public site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Academic branch, e.g. "CSE"
    pub branch: String,
    /// Year of study
    pub year: u8,
    /// Domain applied to
    pub domain: DomainId,
    pub motivation: String,
    /// Submission date
    pub date: NaiveDate,
    pub status: JoinStatus,
    /// Set on approval: the member this request materialized into
    pub member_id: Option<String>,
}

/// Input for submitting a join request
#[derive(Debug, Clone)]
pub struct NewJoinRequest {
    pub name: String,
    pub email: String,
    pub branch: String,
    pub year: u8,
    pub domain: DomainId,
    pub motivation: String,
}

impl NewJoinRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            branch: String::new(),
            year: 1,
            domain: domain.into(),
            motivation: String::new(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>, year: u8) -> Self {
        self.branch = branch.into();
        self.year = year;
        self
    }

    pub fn with_motivation(mut self, motivation: impl Into<String>) -> Self {
        self.motivation = motivation.into();
        self
    }
}

/// Standing of a member. Suspension is the removal mechanism; member
/// records are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Suspended,
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberStatus::Active => f.write_str("active"),
            MemberStatus::Suspended => f.write_str("suspended"),
        }
    }
}

/// A club member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub domain: DomainId,
    pub year: u8,
    pub branch: String,
    pub joined_at: NaiveDate,
    /// Submissions reviewed and accepted
    #[serde(default)]
    pub tasks_completed: u32,
    /// Tasks ever assigned
    #[serde(default)]
    pub total_tasks: u32,
    pub status: MemberStatus,
}

/// Input for creating a member directly, skipping the join workflow
#[derive(Debug, Clone)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub domain: DomainId,
    pub year: u8,
    pub branch: String,
}

impl NewMember {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            domain: domain.into(),
            year: 1,
            branch: String::new(),
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>, year: u8) -> Self {
        self.branch = branch.into();
        self.year = year;
        self
    }
}

/// Partial update to a member's own profile fields
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub year: Option<u8>,
}

impl ProfilePatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn year(mut self, year: u8) -> Self {
        self.year = Some(year);
        self
    }

    pub(crate) fn apply(&self, member: &mut Member) {
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(branch) = &self.branch {
            member.branch = branch.clone();
        }
        if let Some(year) = self.year {
            member.year = year;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!JoinStatus::Pending.is_terminal());
        assert!(JoinStatus::Approved.is_terminal());
        assert!(JoinStatus::Rejected.is_terminal());
    }

    #[test]
    fn profile_patch_leaves_counters_alone() {
        let mut member = Member {
            id: "mem-1".to_string(),
            name: "Sam Okafor".to_string(),
            email: "sam@club.org".to_string(),
            domain: "ai-ml".to_string(),
            year: 2,
            branch: "CSE".to_string(),
            joined_at: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
            tasks_completed: 3,
            total_tasks: 5,
            status: MemberStatus::Active,
        };

        ProfilePatch::default().name("Sam A. Okafor").year(3).apply(&mut member);
        assert_eq!(member.name, "Sam A. Okafor");
        assert_eq!(member.year, 3);
        assert_eq!(member.branch, "CSE");
        assert_eq!(member.tasks_completed, 3);
        assert_eq!(member.total_tasks, 5);
    }
}
