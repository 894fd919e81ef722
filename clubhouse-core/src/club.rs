//! The facade: one `Club` per process
//!
//! `Club` owns the flag store, the entity store, the session holder, and
//! one engine per workflow, all wired at construction. Nothing here gates
//! anything itself: every permission question goes through the evaluator,
//! either inside a workflow or via [`Club::authorize`] for the UI layer.

use std::sync::Arc;

use crate::authz::{self, Action, ActionContext, Decision};
use crate::config::ClubConfig;
use crate::content::ContentWorkflow;
use crate::error::ClubError;
use crate::events::EventWorkflow;
use crate::flags::{FeatureFlags, FlagStore};
use crate::membership::MembershipWorkflow;
use crate::session::{Account, Identity, SessionStore};
use crate::store::{ClubStore, JsonFileStore, PersistError, PersistencePort, SeedData, Snapshot};
use crate::tasks::TaskWorkflow;

pub struct Club {
    flags: Arc<FlagStore>,
    store: Arc<ClubStore>,
    sessions: SessionStore,
    content: ContentWorkflow,
    membership: MembershipWorkflow,
    tasks: TaskWorkflow,
    events: EventWorkflow,
    accounts: Vec<Account>,
    port: Option<Box<dyn PersistencePort>>,
}

impl std::fmt::Debug for Club {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Club").finish_non_exhaustive()
    }
}

impl Club {
    /// Build from seed data alone; nothing is persisted
    pub fn new(seed: SeedData) -> Result<Self, ClubError> {
        seed.validate()?;
        let defaults = seed.state.flags;
        Ok(Self::build(seed, defaults, None))
    }

    /// Build from seed data plus a persistence port. A stored snapshot,
    /// when present, wins over the seed state; the seed still supplies the
    /// domain catalog and the flag defaults that `reset_all` restores.
    pub fn with_persistence(
        mut seed: SeedData,
        port: Box<dyn PersistencePort>,
    ) -> Result<Self, ClubError> {
        let defaults = seed.state.flags;
        if let Some(snapshot) = port.load()? {
            tracing::info!("restoring saved state");
            seed.state = snapshot;
        }
        seed.validate()?;
        Ok(Self::build(seed, defaults, Some(port)))
    }

    /// Build using a config file: file-backed persistence at the
    /// configured path, flag defaults from the config
    pub fn from_config(config: &ClubConfig, mut seed: SeedData) -> Result<Self, ClubError> {
        seed.state.flags = config.flags;
        let port = Box::new(JsonFileStore::new(config.data_file.clone()));
        Self::with_persistence(seed, port)
    }

    fn build(seed: SeedData, defaults: FeatureFlags, port: Option<Box<dyn PersistencePort>>) -> Self {
        let state = seed.state;
        let flags = Arc::new(FlagStore::restore(defaults, state.flags));
        let store = Arc::new(ClubStore::from_collections(
            seed.domains,
            state.content,
            state.join_requests,
            state.members,
            state.tasks,
            state.events,
        ));
        let sessions = SessionStore::new(state.accounts.clone(), flags.clone());

        Self {
            content: ContentWorkflow::new(store.clone(), flags.clone()),
            membership: MembershipWorkflow::new(store.clone(), flags.clone()),
            tasks: TaskWorkflow::new(store.clone(), flags.clone()),
            events: EventWorkflow::new(store.clone(), flags.clone()),
            sessions,
            accounts: state.accounts,
            flags,
            store,
            port,
        }
    }

    pub fn flags(&self) -> &FlagStore {
        &self.flags
    }

    pub fn store(&self) -> &ClubStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn content(&self) -> &ContentWorkflow {
        &self.content
    }

    pub fn membership(&self) -> &MembershipWorkflow {
        &self.membership
    }

    pub fn tasks(&self) -> &TaskWorkflow {
        &self.tasks
    }

    pub fn events(&self) -> &EventWorkflow {
        &self.events
    }

    /// Evaluate a permission question against the current flag state.
    /// This is the only gate the UI layer should consult.
    pub fn authorize(&self, identity: &Identity, action: Action, ctx: &ActionContext) -> Decision {
        authz::authorize(identity, action, ctx, &self.flags.snapshot())
    }

    /// [`Club::authorize`] for public pages where nobody may be signed in
    pub fn authorize_public(
        &self,
        actor: Option<&Identity>,
        action: Action,
        ctx: &ActionContext,
    ) -> Decision {
        authz::authorize_public(actor, action, ctx, &self.flags.snapshot())
    }

    /// Assemble the durable record set as it stands right now
    pub fn snapshot(&self) -> Snapshot {
        let (content, join_requests, members, tasks, events) = self.store.collections();
        Snapshot {
            flags: self.flags.snapshot(),
            accounts: self.accounts.clone(),
            content,
            join_requests,
            members,
            tasks,
            events,
        }
    }

    /// Checkpoint current state through the persistence port.
    ///
    /// A failed save leaves in-memory state exactly as it was; applied
    /// transitions stay applied, and the checkpoint can be retried.
    pub fn save(&self) -> Result<(), PersistError> {
        let port = self.port.as_ref().ok_or(PersistError::NotConfigured)?;
        port.save(&self.snapshot())?;
        tracing::info!("state checkpoint saved");
        Ok(())
    }
}
