//! Roles and the static role-to-capability table
//!
//! The table is fixed at compile time: adding a role or action is a
//! compile-checked change, not a string comparison. Dev is special-cased by
//! the permission evaluator as an unconditional root override before the
//! table is ever consulted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::authz::Action;
use crate::content::ContentKind;

/// Fixed category of identity determining baseline permitted actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Dev,
    Lead,
    Mentor,
    Editor,
    Member,
    Faculty,
}

impl Role {
    /// Every role, in hierarchy order
    pub const ALL: [Role; 6] = [
        Role::Dev,
        Role::Lead,
        Role::Mentor,
        Role::Editor,
        Role::Member,
        Role::Faculty,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Role::Dev => "Developer",
            Role::Lead => "Lead",
            Role::Mentor => "Mentor",
            Role::Editor => "Editor",
            Role::Member => "Member",
            Role::Faculty => "Faculty",
        }
    }

    /// Whether an identity with this role must carry a domain affiliation
    pub fn requires_domain(&self) -> bool {
        matches!(self, Role::Lead | Role::Mentor | Role::Member)
    }

    /// The static permission table.
    ///
    /// Dev answers true for everything, but callers must not rely on that:
    /// the evaluator applies the root override before consulting the table.
    pub fn permits(&self, action: Action) -> bool {
        use Action::*;
        match self {
            Role::Dev => true,
            Role::Lead => matches!(
                action,
                ViewDashboard
                    | ManageOwnProfile
                    | CreateContent(_)
                    | ApproveContent
                    | DeleteContent
                    | ManageUsers
                    | AssignTask
                    | ReviewSubmission
                    | ApproveJoinRequest
                    | CreateEvent
                    | RegisterJoinRequest
                    | RegisterForEvent
            ),
            Role::Mentor => matches!(
                action,
                ViewDashboard
                    | ManageOwnProfile
                    | CreateContent(ContentKind::BlogPost)
                    | DeleteContent
                    | AssignTask
                    | ReviewSubmission
                    | RegisterJoinRequest
                    | RegisterForEvent
            ),
            Role::Editor => matches!(
                action,
                ViewDashboard
                    | ManageOwnProfile
                    | CreateContent(_)
                    | DeleteContent
                    | RegisterJoinRequest
                    | RegisterForEvent
            ),
            Role::Member => matches!(
                action,
                ViewDashboard
                    | ManageOwnProfile
                    | SubmitTask
                    | RegisterJoinRequest
                    | RegisterForEvent
            ),
            Role::Faculty => matches!(
                action,
                ViewDashboard | ManageOwnProfile | RegisterJoinRequest | RegisterForEvent
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Role::Dev => "dev",
            Role::Lead => "lead",
            Role::Mentor => "mentor",
            Role::Editor => "editor",
            Role::Member => "member",
            Role::Faculty => "faculty",
        };
        f.write_str(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_approves_and_manages() {
        assert!(Role::Lead.permits(Action::ApproveContent));
        assert!(Role::Lead.permits(Action::ApproveJoinRequest));
        assert!(Role::Lead.permits(Action::ManageUsers));
        assert!(Role::Lead.permits(Action::CreateEvent));
    }

    #[test]
    fn mentor_writes_blogs_but_not_announcements() {
        assert!(Role::Mentor.permits(Action::CreateContent(ContentKind::BlogPost)));
        assert!(!Role::Mentor.permits(Action::CreateContent(ContentKind::Announcement)));
        assert!(Role::Mentor.permits(Action::ReviewSubmission));
        assert!(!Role::Mentor.permits(Action::ApproveContent));
    }

    #[test]
    fn editor_authors_both_kinds_without_approval_authority() {
        assert!(Role::Editor.permits(Action::CreateContent(ContentKind::BlogPost)));
        assert!(Role::Editor.permits(Action::CreateContent(ContentKind::Announcement)));
        assert!(!Role::Editor.permits(Action::ApproveContent));
        assert!(!Role::Editor.permits(Action::ManageUsers));
    }

    #[test]
    fn member_submits_tasks_only() {
        assert!(Role::Member.permits(Action::SubmitTask));
        assert!(!Role::Member.permits(Action::AssignTask));
        assert!(!Role::Member.permits(Action::CreateContent(ContentKind::BlogPost)));
    }

    #[test]
    fn faculty_observes() {
        assert!(Role::Faculty.permits(Action::ViewDashboard));
        assert!(!Role::Faculty.permits(Action::SubmitTask));
        assert!(!Role::Faculty.permits(Action::ManageUsers));
    }

    #[test]
    fn nobody_in_table_manages_flags_or_domains() {
        for role in [Role::Lead, Role::Mentor, Role::Editor, Role::Member, Role::Faculty] {
            assert!(!role.permits(Action::ManageFlags), "{role} must not manage flags");
            assert!(!role.permits(Action::ManageDomains), "{role} must not manage domains");
        }
    }

    #[test]
    fn domain_requirement_follows_role() {
        assert!(Role::Lead.requires_domain());
        assert!(Role::Mentor.requires_domain());
        assert!(Role::Member.requires_domain());
        assert!(!Role::Dev.requires_domain());
        assert!(!Role::Editor.requires_domain());
        assert!(!Role::Faculty.requires_domain());
    }

    #[test]
    fn display_matches_serde_tag() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
        }
    }
}
