//! Join requests and the member lifecycle
//!
//! Approval is the sensitive edge: the request flip and the member
//! creation commit together under the membership write lock, so two racing
//! approvals cannot mint two members; the loser finds the request already
//! decided.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::authz::{Action, ActionContext, DenyReason, authorize, authorize_public};
use crate::error::WorkflowError;
use crate::flags::FlagStore;
use crate::membership::types::{
    JoinRequest, JoinStatus, Member, MemberStatus, NewJoinRequest, NewMember, ProfilePatch,
};
use crate::role::Role;
use crate::session::Identity;
use crate::store::ClubStore;

pub struct MembershipWorkflow {
    store: Arc<ClubStore>,
    flags: Arc<FlagStore>,
}

impl MembershipWorkflow {
    pub fn new(store: Arc<ClubStore>, flags: Arc<FlagStore>) -> Self {
        Self { store, flags }
    }

    /// Submit a join request from the public site. `actor` is `None` for
    /// guests, who face the same switches and gates as signed-in users.
    pub fn submit(
        &self,
        actor: Option<&Identity>,
        new: NewJoinRequest,
    ) -> Result<JoinRequest, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize_public(actor, Action::RegisterJoinRequest, &ActionContext::global(), &flags)
            .require()?;
        self.store.require_domain(&new.domain)?;

        let request = JoinRequest {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            branch: new.branch,
            year: new.year,
            domain: new.domain,
            motivation: new.motivation,
            date: Utc::now().date_naive(),
            status: JoinStatus::Pending,
            member_id: None,
        };
        let request = self.store.insert_join_request(request);
        tracing::info!(request = %request.id, domain = %request.domain, "join request submitted");
        Ok(request)
    }

    /// Pending → Approved, materializing exactly one member.
    ///
    /// The terminal check and the member insert happen under one lock;
    /// a request that is already decided answers `AlreadyDecided` no
    /// matter who asks.
    pub fn approve(&self, actor: &Identity, request_id: &str) -> Result<Member, WorkflowError> {
        let flags = self.flags.snapshot();
        let request = self
            .store
            .join_request(request_id)
            .ok_or_else(|| WorkflowError::RequestNotFound(request_id.to_string()))?;

        let ctx = ActionContext::in_domain(request.domain.clone());
        authorize(actor, Action::ApproveJoinRequest, &ctx, &flags).require()?;

        let member = self.store.update_membership(|table| {
            let request = table
                .join_requests
                .get_mut(request_id)
                .ok_or_else(|| WorkflowError::RequestNotFound(request_id.to_string()))?;
            if request.status.is_terminal() {
                return Err(DenyReason::AlreadyDecided.into());
            }

            let member = Member {
                id: Uuid::new_v4().to_string(),
                name: request.name.clone(),
                email: request.email.clone(),
                domain: request.domain.clone(),
                year: request.year,
                branch: request.branch.clone(),
                joined_at: Utc::now().date_naive(),
                tasks_completed: 0,
                total_tasks: 0,
                status: MemberStatus::Active,
            };
            request.status = JoinStatus::Approved;
            request.member_id = Some(member.id.clone());
            table.members.insert(member.id.clone(), member.clone());
            Ok(member)
        })?;

        tracing::info!(
            request = %request_id,
            member = %member.id,
            approver = %actor.email,
            "join request approved"
        );
        Ok(member)
    }

    /// Pending → Rejected. Terminal requests answer `AlreadyDecided`.
    pub fn reject(&self, actor: &Identity, request_id: &str) -> Result<JoinRequest, WorkflowError> {
        let flags = self.flags.snapshot();
        let request = self
            .store
            .join_request(request_id)
            .ok_or_else(|| WorkflowError::RequestNotFound(request_id.to_string()))?;

        let ctx = ActionContext::in_domain(request.domain.clone());
        authorize(actor, Action::ApproveJoinRequest, &ctx, &flags).require()?;

        let request = self.store.update_membership(|table| {
            let request = table
                .join_requests
                .get_mut(request_id)
                .ok_or_else(|| WorkflowError::RequestNotFound(request_id.to_string()))?;
            if request.status.is_terminal() {
                return Err(DenyReason::AlreadyDecided.into());
            }
            request.status = JoinStatus::Rejected;
            Ok(request.clone())
        })?;

        tracing::info!(request = %request_id, approver = %actor.email, "join request rejected");
        Ok(request)
    }

    /// Create a member directly, skipping the join workflow. Dev works
    /// anywhere; a Lead only inside their own domain.
    pub fn add_member(&self, actor: &Identity, new: NewMember) -> Result<Member, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::ManageUsers, &ActionContext::global(), &flags).require()?;
        self.store.require_domain(&new.domain)?;

        if !actor.is_dev() && actor.domain.as_deref() != Some(new.domain.as_str()) {
            return Err(DenyReason::WrongDomain.into());
        }

        let member = Member {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            domain: new.domain,
            year: new.year,
            branch: new.branch,
            joined_at: Utc::now().date_naive(),
            tasks_completed: 0,
            total_tasks: 0,
            status: MemberStatus::Active,
        };
        let member = self.store.insert_member(member);
        tracing::info!(member = %member.id, domain = %member.domain, "member added directly");
        Ok(member)
    }

    /// Update profile fields: the member themself, or Lead/Mentor/Dev
    pub fn update_profile(
        &self,
        actor: &Identity,
        member_id: &str,
        patch: ProfilePatch,
    ) -> Result<Member, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::ManageOwnProfile, &ActionContext::global(), &flags).require()?;

        self.store.update_member(member_id, |member| {
            let is_self = actor.email == member.email;
            let is_elevated = actor.is_dev() || matches!(actor.role, Role::Lead | Role::Mentor);
            if !is_self && !is_elevated {
                return Err(DenyReason::RoleNotPermitted.into());
            }
            patch.apply(member);
            Ok(member.clone())
        })
    }

    /// Move a member to another domain. Lead/Dev only, never self-service.
    pub fn reassign_domain(
        &self,
        actor: &Identity,
        member_id: &str,
        domain: impl Into<String>,
    ) -> Result<Member, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::ManageUsers, &ActionContext::global(), &flags).require()?;
        let domain = domain.into();
        self.store.require_domain(&domain)?;

        let member = self.store.update_member(member_id, |member| {
            member.domain = domain.clone();
            Ok(member.clone())
        })?;
        tracing::info!(member = %member.id, domain = %member.domain, "member reassigned");
        Ok(member)
    }

    /// Active → Suspended. Suspension is the removal mechanism; records
    /// are never deleted.
    pub fn suspend(&self, actor: &Identity, member_id: &str) -> Result<Member, WorkflowError> {
        self.set_status(actor, member_id, MemberStatus::Suspended)
    }

    /// Suspended → Active
    pub fn reinstate(&self, actor: &Identity, member_id: &str) -> Result<Member, WorkflowError> {
        self.set_status(actor, member_id, MemberStatus::Active)
    }

    fn set_status(
        &self,
        actor: &Identity,
        member_id: &str,
        status: MemberStatus,
    ) -> Result<Member, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(actor, Action::ManageUsers, &ActionContext::global(), &flags).require()?;

        let member = self.store.update_member(member_id, |member| {
            member.status = status;
            Ok(member.clone())
        })?;
        tracing::info!(member = %member.id, status = %member.status, "member status changed");
        Ok(member)
    }
}
