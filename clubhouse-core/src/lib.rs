//! clubhouse-core: access control and content workflows for a student tech club
//!
//! This crate provides the foundational components for clubhouse:
//!
//! - **Roles & permissions** - [`Role`] and the single evaluator [`authorize`]
//! - **Feature flags** - [`FlagStore`] with capability gates and emergency switches
//! - **Sessions** - [`SessionStore`] for login/logout and the current [`Identity`]
//! - **Content pipeline** - [`ContentWorkflow`] for draft → pending → published
//! - **Membership** - [`MembershipWorkflow`] for join requests and member records
//! - **Tasks & events** - [`TaskWorkflow`] and [`EventWorkflow`]
//! - **Persistence** - [`Snapshot`] checkpoints through a [`PersistencePort`]
//!
//! # Quick Start
//!
//! ```
//! use clubhouse_core::{Club, ContentKind, Domain, NewContent, Role, SeedData, Snapshot};
//! use clubhouse_core::session::Account;
//!
//! let domains = vec![Domain::new(
//!     "ai-ml", "AI / Machine Learning", "AI/ML", "Models and the math behind them", "Asha Iyer",
//! )];
//! let mut state = Snapshot::default();
//! state.accounts.push(Account::new("acct-dev", "Root", "dev@club.org", "dev123", Role::Dev, None));
//!
//! let club = Club::new(SeedData::new(domains, state)).unwrap();
//! let dev = club.sessions().login("dev@club.org", "dev123").unwrap();
//!
//! let draft = club
//!     .content()
//!     .create(&dev, NewContent::new(ContentKind::BlogPost, "Hello, club"))
//!     .unwrap();
//! club.content().submit_for_approval(&dev, &draft.slug).unwrap();
//! club.content().approve(&dev, &draft.slug).unwrap();
//! assert_eq!(club.store().published().len(), 1);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────── Club ────────────────────────┐
//! │  SessionStore          FlagStore (gates + switches)  │
//! │       │                     │                        │
//! │  Identity ──► authorize(identity, action, ctx) ◄─────┼── UI gating
//! │                     │                                │
//! │   Content / Membership / Task / Event workflows      │
//! │                     │                                │
//! │                 ClubStore ──► Snapshot ──► port      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every deny carries a [`DenyReason`] chosen by a fixed precedence: the
//! dev override first, then the emergency switches, then the capability
//! gate, the role table, and finally domain scope.

pub mod authz;
pub mod club;
pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod events;
pub mod flags;
pub mod membership;
pub mod role;
pub mod session;
pub mod store;
pub mod tasks;

// Re-export key types for convenience
pub use authz::{Action, ActionContext, Decision, DenyReason, authorize, authorize_public};
pub use club::Club;
pub use config::{ClubConfig, ConfigError};
pub use content::{ContentItem, ContentKind, ContentStatus, ContentWorkflow, NewContent};
pub use domain::{Domain, DomainId};
pub use error::{ClubError, WorkflowError};
pub use events::{Event, EventKind, EventStatus, EventWorkflow, NewEvent};
pub use flags::{FeatureFlags, Flag, FlagError, FlagStore};
pub use membership::{
    JoinRequest, JoinStatus, Member, MemberStatus, MembershipWorkflow, NewJoinRequest, NewMember,
};
pub use role::Role;
pub use session::{Account, AuthError, Identity, SessionStore};
pub use store::{
    ClubStore, IntegrityError, JsonFileStore, MemoryStore, PersistError, PersistencePort, SeedData,
    Snapshot,
};
pub use tasks::{NewTask, Task, TaskPriority, TaskStatus, TaskWorkflow};
