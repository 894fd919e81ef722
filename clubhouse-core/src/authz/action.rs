//! The closed capability vocabulary
//!
//! Every permission question in the system is phrased as one of these
//! actions. The classification methods match exhaustively so a new action
//! cannot be added without deciding how the emergency switches and
//! capability gates treat it.

use std::fmt;

use crate::content::ContentKind;
use crate::flags::Flag;

/// Something an identity may attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ViewDashboard,
    ManageOwnProfile,
    CreateContent(ContentKind),
    ApproveContent,
    DeleteContent,
    ManageUsers,
    ManageDomains,
    ManageFlags,
    AssignTask,
    SubmitTask,
    ReviewSubmission,
    RegisterJoinRequest,
    ApproveJoinRequest,
    CreateEvent,
    RegisterForEvent,
}

impl Action {
    /// Whether the action changes state. Only the read-only dashboard view
    /// is exempt; the frozen switch refuses everything else.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::ViewDashboard)
    }

    /// Whether the action lives behind the dashboard (as opposed to the
    /// public intake pages, which stay open during maintenance).
    pub fn is_dashboard(&self) -> bool {
        !matches!(self, Action::RegisterJoinRequest | Action::RegisterForEvent)
    }

    /// The capability gate controlling this action, if any.
    ///
    /// Gates sit on the submission side of each workflow. Approval and
    /// management actions carry no gate: pending work must stay decidable
    /// even while new intake is switched off.
    pub fn capability_flag(&self) -> Option<Flag> {
        match self {
            Action::CreateContent(ContentKind::BlogPost) => Some(Flag::BlogPosting),
            Action::CreateContent(ContentKind::Announcement) => Some(Flag::Announcements),
            Action::SubmitTask => Some(Flag::TaskSubmissions),
            Action::RegisterJoinRequest => Some(Flag::JoinRequests),
            Action::CreateEvent => Some(Flag::EventCreation),
            Action::RegisterForEvent => Some(Flag::Registrations),
            Action::ViewDashboard
            | Action::ManageOwnProfile
            | Action::ApproveContent
            | Action::DeleteContent
            | Action::ManageUsers
            | Action::ManageDomains
            | Action::ManageFlags
            | Action::AssignTask
            | Action::ReviewSubmission
            | Action::ApproveJoinRequest => None,
        }
    }

    /// Whether the action is confined to the actor's own domain
    pub fn is_domain_scoped(&self) -> bool {
        matches!(self, Action::ApproveContent | Action::ApproveJoinRequest)
    }

    /// Stable tag for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::ViewDashboard => "view_dashboard",
            Action::ManageOwnProfile => "manage_own_profile",
            Action::CreateContent(ContentKind::BlogPost) => "create_blog_post",
            Action::CreateContent(ContentKind::Announcement) => "create_announcement",
            Action::ApproveContent => "approve_content",
            Action::DeleteContent => "delete_content",
            Action::ManageUsers => "manage_users",
            Action::ManageDomains => "manage_domains",
            Action::ManageFlags => "manage_flags",
            Action::AssignTask => "assign_task",
            Action::SubmitTask => "submit_task",
            Action::ReviewSubmission => "review_submission",
            Action::RegisterJoinRequest => "register_join_request",
            Action::ApproveJoinRequest => "approve_join_request",
            Action::CreateEvent => "create_event",
            Action::RegisterForEvent => "register_for_event",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
