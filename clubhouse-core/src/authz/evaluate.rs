//! The single permission evaluator
//!
//! All gating in the system funnels through [`authorize`]. Checks run in a
//! fixed order and the first failing check names the denial; callers can
//! therefore show the user the most actionable reason (an emergency switch
//! beats a missing capability beats a role gap).

use crate::authz::action::Action;
use crate::authz::decision::{Decision, DenyReason};
use crate::domain::DomainId;
use crate::flags::FeatureFlags;
use crate::session::Identity;

/// Target of a domain-scoped action
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    /// Domain the target belongs to, `None` for domainless targets
    pub domain: Option<DomainId>,
}

impl ActionContext {
    /// A target with no domain affiliation
    pub fn global() -> Self {
        Self { domain: None }
    }

    /// A target belonging to the given domain
    pub fn in_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }
}

/// Decide whether `identity` may perform `action` on the target described
/// by `ctx`, under the given flag snapshot.
///
/// Precedence, earliest check wins:
/// 1. Dev root override
/// 2. maintenance mode (dashboard actions)
/// 3. frozen switch (mutations)
/// 4. capability gate for the action
/// 5. static role table
/// 6. domain scope
pub fn authorize(
    identity: &Identity,
    action: Action,
    ctx: &ActionContext,
    flags: &FeatureFlags,
) -> Decision {
    if identity.is_dev() {
        return Decision::Allowed;
    }

    if flags.maintenance_mode && action.is_dashboard() {
        return Decision::Denied(DenyReason::MaintenanceMode);
    }

    if flags.dashboards_frozen && action.is_mutation() {
        return Decision::Denied(DenyReason::Frozen);
    }

    if let Some(flag) = action.capability_flag() {
        if !flags.get(flag) {
            return Decision::Denied(DenyReason::FeatureDisabled);
        }
    }

    if !identity.role.permits(action) {
        return Decision::Denied(DenyReason::RoleNotPermitted);
    }

    if action.is_domain_scoped() && identity.domain != ctx.domain {
        return Decision::Denied(DenyReason::WrongDomain);
    }

    Decision::Allowed
}

/// [`authorize`] for the public intake pages, where the actor may be a
/// guest with no identity at all.
///
/// A guest faces the same emergency switches and capability gates as any
/// non-Dev identity; the role and domain checks do not apply because the
/// public actions are open to everyone.
pub fn authorize_public(
    actor: Option<&Identity>,
    action: Action,
    ctx: &ActionContext,
    flags: &FeatureFlags,
) -> Decision {
    match actor {
        Some(identity) => authorize(identity, action, ctx, flags),
        None => {
            if flags.maintenance_mode && action.is_dashboard() {
                return Decision::Denied(DenyReason::MaintenanceMode);
            }
            if flags.dashboards_frozen && action.is_mutation() {
                return Decision::Denied(DenyReason::Frozen);
            }
            if let Some(flag) = action.capability_flag() {
                if !flags.get(flag) {
                    return Decision::Denied(DenyReason::FeatureDisabled);
                }
            }
            Decision::Allowed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::role::Role;

    fn dev() -> Identity {
        Identity::new("acct-dev", "Root", "dev@club.org", Role::Dev, None)
    }

    fn lead(domain: &str) -> Identity {
        Identity::new(
            "acct-lead",
            "Asha Iyer",
            "lead@club.org",
            Role::Lead,
            Some(domain.to_string()),
        )
    }

    fn member(domain: &str) -> Identity {
        Identity::new(
            "acct-member",
            "Sam Okafor",
            "member@club.org",
            Role::Member,
            Some(domain.to_string()),
        )
    }

    fn editor() -> Identity {
        Identity::new("acct-editor", "Priya Shah", "editor@club.org", Role::Editor, None)
    }

    fn faculty() -> Identity {
        Identity::new(
            "acct-faculty",
            "Dr. Rao",
            "faculty@club.org",
            Role::Faculty,
            None,
        )
    }

    #[test]
    fn dev_override_beats_every_switch_and_scope() {
        let mut flags = FeatureFlags::default();
        flags.maintenance_mode = true;
        flags.dashboards_frozen = true;
        flags.blog_posting_enabled = false;

        let ctx = ActionContext::in_domain("web-dev");
        for action in [
            Action::ViewDashboard,
            Action::CreateContent(ContentKind::BlogPost),
            Action::ApproveContent,
            Action::ManageFlags,
            Action::RegisterJoinRequest,
        ] {
            assert_eq!(authorize(&dev(), action, &ctx, &flags), Decision::Allowed);
        }
    }

    #[test]
    fn maintenance_blocks_dashboard_actions_only() {
        let mut flags = FeatureFlags::default();
        flags.maintenance_mode = true;
        let ctx = ActionContext::global();

        assert_eq!(
            authorize(&lead("ai-ml"), Action::ViewDashboard, &ctx, &flags),
            Decision::Denied(DenyReason::MaintenanceMode)
        );
        assert_eq!(
            authorize(&lead("ai-ml"), Action::CreateEvent, &ctx, &flags),
            Decision::Denied(DenyReason::MaintenanceMode)
        );
        // public intake pages stay open
        assert_eq!(
            authorize(&member("ai-ml"), Action::RegisterForEvent, &ctx, &flags),
            Decision::Allowed
        );
        assert_eq!(
            authorize(&faculty(), Action::RegisterJoinRequest, &ctx, &flags),
            Decision::Allowed
        );
    }

    #[test]
    fn frozen_blocks_mutations_but_not_viewing() {
        let mut flags = FeatureFlags::default();
        flags.dashboards_frozen = true;
        let ctx = ActionContext::global();

        assert_eq!(
            authorize(&lead("ai-ml"), Action::ViewDashboard, &ctx, &flags),
            Decision::Allowed
        );
        assert_eq!(
            authorize(&lead("ai-ml"), Action::CreateEvent, &ctx, &flags),
            Decision::Denied(DenyReason::Frozen)
        );
        // frozen reaches the public intake too: registration mutates state
        assert_eq!(
            authorize(&member("ai-ml"), Action::RegisterForEvent, &ctx, &flags),
            Decision::Denied(DenyReason::Frozen)
        );
    }

    #[test]
    fn maintenance_outranks_frozen_on_dashboard_actions() {
        let mut flags = FeatureFlags::default();
        flags.maintenance_mode = true;
        flags.dashboards_frozen = true;
        let ctx = ActionContext::global();

        assert_eq!(
            authorize(&lead("ai-ml"), Action::ViewDashboard, &ctx, &flags),
            Decision::Denied(DenyReason::MaintenanceMode)
        );
        // non-dashboard mutation falls through to the frozen check
        assert_eq!(
            authorize(&member("ai-ml"), Action::RegisterForEvent, &ctx, &flags),
            Decision::Denied(DenyReason::Frozen)
        );
    }

    #[test]
    fn disabled_gate_outranks_role_verdict() {
        let mut flags = FeatureFlags::default();
        flags.blog_posting_enabled = false;
        let ctx = ActionContext::global();

        // editor could write blogs; the gate answers first
        assert_eq!(
            authorize(&editor(), Action::CreateContent(ContentKind::BlogPost), &ctx, &flags),
            Decision::Denied(DenyReason::FeatureDisabled)
        );
        // faculty could never write blogs, but the gate still answers first
        assert_eq!(
            authorize(&faculty(), Action::CreateContent(ContentKind::BlogPost), &ctx, &flags),
            Decision::Denied(DenyReason::FeatureDisabled)
        );
    }

    #[test]
    fn role_table_denies_after_gates_pass() {
        let flags = FeatureFlags::default();
        let ctx = ActionContext::global();

        assert_eq!(
            authorize(&member("ai-ml"), Action::ApproveContent, &ctx, &flags),
            Decision::Denied(DenyReason::RoleNotPermitted)
        );
        assert_eq!(
            authorize(&faculty(), Action::SubmitTask, &ctx, &flags),
            Decision::Denied(DenyReason::RoleNotPermitted)
        );
    }

    #[test]
    fn approvals_are_confined_to_own_domain() {
        let flags = FeatureFlags::default();

        assert_eq!(
            authorize(
                &lead("ai-ml"),
                Action::ApproveContent,
                &ActionContext::in_domain("ai-ml"),
                &flags
            ),
            Decision::Allowed
        );
        assert_eq!(
            authorize(
                &lead("ai-ml"),
                Action::ApproveContent,
                &ActionContext::in_domain("web-dev"),
                &flags
            ),
            Decision::Denied(DenyReason::WrongDomain)
        );
        assert_eq!(
            authorize(
                &lead("ai-ml"),
                Action::ApproveJoinRequest,
                &ActionContext::global(),
                &flags
            ),
            Decision::Denied(DenyReason::WrongDomain)
        );
    }

    #[test]
    fn domain_scope_ignores_unscoped_actions() {
        let flags = FeatureFlags::default();
        // deleting content is not domain-scoped; a mentor may delete anywhere
        let mentor = Identity::new(
            "acct-mentor",
            "Luis Ortega",
            "mentor@club.org",
            Role::Mentor,
            Some("ai-ml".to_string()),
        );
        assert_eq!(
            authorize(
                &mentor,
                Action::DeleteContent,
                &ActionContext::in_domain("web-dev"),
                &flags
            ),
            Decision::Allowed
        );
    }

    #[test]
    fn guests_face_switches_and_gates_but_no_role_table() {
        let flags = FeatureFlags::default();
        let ctx = ActionContext::global();

        assert_eq!(
            authorize_public(None, Action::RegisterJoinRequest, &ctx, &flags),
            Decision::Allowed
        );

        let mut gated = flags;
        gated.join_requests_enabled = false;
        assert_eq!(
            authorize_public(None, Action::RegisterJoinRequest, &ctx, &gated),
            Decision::Denied(DenyReason::FeatureDisabled)
        );

        let mut frozen = flags;
        frozen.dashboards_frozen = true;
        assert_eq!(
            authorize_public(None, Action::RegisterForEvent, &ctx, &frozen),
            Decision::Denied(DenyReason::Frozen)
        );

        // identity present: falls through to the full evaluator
        assert_eq!(
            authorize_public(Some(&dev()), Action::RegisterForEvent, &ctx, &frozen),
            Decision::Allowed
        );
    }

    #[test]
    fn defaults_allow_the_ordinary_paths() {
        let flags = FeatureFlags::default();
        let ctx = ActionContext::global();

        assert_eq!(
            authorize(&member("ai-ml"), Action::RegisterForEvent, &ctx, &flags),
            Decision::Allowed
        );
        assert_eq!(
            authorize(&member("ai-ml"), Action::SubmitTask, &ctx, &flags),
            Decision::Allowed
        );
        assert_eq!(
            authorize(&editor(), Action::CreateContent(ContentKind::Announcement), &ctx, &flags),
            Decision::Allowed
        );
    }
}
