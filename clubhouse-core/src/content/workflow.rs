//! The draft → pending → published/rejected pipeline
//!
//! Every operation runs the permission evaluator first, then the ownership
//! rule, then the transition check, and only then mutates. All of it runs
//! under the content write lock, so a losing racer sees the updated status
//! and fails its transition check.

use std::sync::Arc;

use chrono::Utc;

use crate::authz::{Action, ActionContext, DenyReason, authorize};
use crate::content::item::{Author, ContentItem, ContentPatch, ContentStatus, NewContent};
use crate::error::WorkflowError;
use crate::flags::FlagStore;
use crate::role::Role;
use crate::session::Identity;
use crate::store::ClubStore;

pub struct ContentWorkflow {
    store: Arc<ClubStore>,
    flags: Arc<FlagStore>,
}

impl ContentWorkflow {
    pub fn new(store: Arc<ClubStore>, flags: Arc<FlagStore>) -> Self {
        Self { store, flags }
    }

    /// Create a draft authored by `actor`
    pub fn create(&self, actor: &Identity, new: NewContent) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        authorize(
            actor,
            Action::CreateContent(new.kind),
            &ActionContext::global(),
            &flags,
        )
        .require()?;

        if let Some(domain) = &new.domain {
            self.store.require_domain(domain)?;
        }

        let item = ContentItem {
            slug: new.slug_or_fresh(),
            kind: new.kind,
            title: new.title,
            excerpt: new.excerpt,
            body: new.body,
            author: Author {
                name: actor.name.clone(),
                email: actor.email.clone(),
            },
            domain: new.domain,
            tags: new.tags,
            date: Utc::now().date_naive(),
            published_at: None,
            status: ContentStatus::Draft,
        };

        let item = self.store.insert_content(item)?;
        tracing::info!(slug = %item.slug, kind = %item.kind, author = %item.author.email, "draft created");
        Ok(item)
    }

    /// Edit a draft in place. Only drafts are editable.
    pub fn update_draft(
        &self,
        actor: &Identity,
        slug: &str,
        patch: ContentPatch,
    ) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        self.store.update_content(slug, |item| {
            authorize(actor, Action::CreateContent(item.kind), &ActionContext::global(), &flags)
                .require()?;
            require_author_or_authority(actor, item)?;
            if item.status != ContentStatus::Draft {
                return Err(DenyReason::InvalidTransition.into());
            }
            patch.apply(item);
            Ok(item.clone())
        })
    }

    /// Draft → Pending
    pub fn submit_for_approval(
        &self,
        actor: &Identity,
        slug: &str,
    ) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        let item = self.store.update_content(slug, |item| {
            authorize(actor, Action::CreateContent(item.kind), &ActionContext::global(), &flags)
                .require()?;
            require_author_or_authority(actor, item)?;
            if item.status != ContentStatus::Draft {
                return Err(DenyReason::InvalidTransition.into());
            }
            item.status = ContentStatus::Pending;
            Ok(item.clone())
        })?;
        tracing::info!(slug = %item.slug, "submitted for approval");
        Ok(item)
    }

    /// Pending → Published, stamping the publication date
    pub fn approve(&self, actor: &Identity, slug: &str) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        let item = self.store.update_content(slug, |item| {
            let ctx = ActionContext {
                domain: item.domain.clone(),
            };
            authorize(actor, Action::ApproveContent, &ctx, &flags).require()?;
            if item.status != ContentStatus::Pending {
                return Err(DenyReason::InvalidTransition.into());
            }
            item.status = ContentStatus::Published;
            item.published_at = Some(Utc::now().date_naive());
            Ok(item.clone())
        })?;
        tracing::info!(slug = %item.slug, approver = %actor.email, "published");
        Ok(item)
    }

    /// Pending → Rejected. The body is retained so the author can return
    /// the item to draft and resubmit.
    pub fn reject(&self, actor: &Identity, slug: &str) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        let item = self.store.update_content(slug, |item| {
            let ctx = ActionContext {
                domain: item.domain.clone(),
            };
            authorize(actor, Action::ApproveContent, &ctx, &flags).require()?;
            if item.status != ContentStatus::Pending {
                return Err(DenyReason::InvalidTransition.into());
            }
            item.status = ContentStatus::Rejected;
            Ok(item.clone())
        })?;
        tracing::info!(slug = %item.slug, approver = %actor.email, "rejected");
        Ok(item)
    }

    /// Pending/Published/Rejected → Draft, the only route back to
    /// editability. Clears any publication date.
    pub fn return_to_draft(
        &self,
        actor: &Identity,
        slug: &str,
    ) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        let item = self.store.update_content(slug, |item| {
            authorize(actor, Action::CreateContent(item.kind), &ActionContext::global(), &flags)
                .require()?;
            require_author_or_authority(actor, item)?;
            if item.status == ContentStatus::Draft {
                return Err(DenyReason::InvalidTransition.into());
            }
            item.status = ContentStatus::Draft;
            item.published_at = None;
            Ok(item.clone())
        })?;
        tracing::info!(slug = %item.slug, "returned to draft");
        Ok(item)
    }

    /// Remove an item. Who may delete depends on its state: the author
    /// while Draft/Pending, the domain lead once Published, Dev always.
    /// Rejected items must go back to draft first (or Dev deletes them).
    pub fn delete(&self, actor: &Identity, slug: &str) -> Result<ContentItem, WorkflowError> {
        let flags = self.flags.snapshot();
        let item = self.store.remove_content(slug, |item| {
            authorize(actor, Action::DeleteContent, &ActionContext::global(), &flags).require()?;
            if actor.is_dev() {
                return Ok(());
            }
            match item.status {
                ContentStatus::Draft | ContentStatus::Pending => {
                    if is_author(actor, item) {
                        Ok(())
                    } else {
                        Err(ownership_denial(actor).into())
                    }
                }
                ContentStatus::Published => {
                    if actor.role == Role::Lead
                        && item.domain.is_some()
                        && actor.domain == item.domain
                    {
                        Ok(())
                    } else {
                        Err(ownership_denial(actor).into())
                    }
                }
                ContentStatus::Rejected => Err(DenyReason::InvalidTransition.into()),
            }
        })?;
        tracing::info!(slug = %item.slug, by = %actor.email, "deleted");
        Ok(item)
    }
}

fn is_author(actor: &Identity, item: &ContentItem) -> bool {
    actor.email == item.author.email
}

fn is_domain_authority(actor: &Identity, item: &ContentItem) -> bool {
    matches!(actor.role, Role::Lead | Role::Mentor)
        && item.domain.is_some()
        && actor.domain == item.domain
}

/// Author, a Lead/Mentor of the item's domain, or Dev
fn require_author_or_authority(actor: &Identity, item: &ContentItem) -> Result<(), WorkflowError> {
    if actor.is_dev() || is_author(actor, item) || is_domain_authority(actor, item) {
        Ok(())
    } else {
        Err(ownership_denial(actor).into())
    }
}

/// An authority role outside the item's domain gets WrongDomain; everyone
/// else simply lacks the standing.
fn ownership_denial(actor: &Identity) -> DenyReason {
    if matches!(actor.role, Role::Lead | Role::Mentor) {
        DenyReason::WrongDomain
    } else {
        DenyReason::RoleNotPermitted
    }
}
