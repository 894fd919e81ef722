//! Process-wide feature flag store
//!
//! One store per process, constructed explicitly and injected into every
//! component that needs to read flags before authorizing an action. A single
//! lock keeps every mutation immediately visible to all readers.

use parking_lot::RwLock;

use crate::role::Role;
use crate::session::Identity;

use super::types::{FeatureFlags, Flag, FlagError};

/// Mutable flag state plus the defaults it resets to
pub struct FlagStore {
    state: RwLock<FeatureFlags>,
    defaults: FeatureFlags,
}

impl FlagStore {
    /// Create a store holding the documented defaults
    pub fn new() -> Self {
        Self::with_defaults(FeatureFlags::default())
    }

    /// Create a store whose reset target is `defaults` (e.g. from config)
    pub fn with_defaults(defaults: FeatureFlags) -> Self {
        Self {
            state: RwLock::new(defaults),
            defaults,
        }
    }

    /// Create a store with restored state, keeping `defaults` as the reset target
    pub fn restore(defaults: FeatureFlags, current: FeatureFlags) -> Self {
        Self {
            state: RwLock::new(current),
            defaults,
        }
    }

    /// Read one flag
    pub fn get(&self, flag: Flag) -> bool {
        self.state.read().get(flag)
    }

    /// Copy out the whole table
    pub fn snapshot(&self) -> FeatureFlags {
        *self.state.read()
    }

    /// The defaults `reset_all` restores
    pub fn defaults(&self) -> FeatureFlags {
        self.defaults
    }

    /// Set one flag. Dev only.
    pub fn set(&self, actor: &Identity, flag: Flag, value: bool) -> Result<(), FlagError> {
        self.check_actor(actor)?;
        self.state.write().set(flag, value);
        tracing::info!(flag = %flag, value, actor = %actor.email, "feature flag set");
        Ok(())
    }

    /// Flip one flag, returning the new value. Dev only.
    pub fn toggle(&self, actor: &Identity, flag: Flag) -> Result<bool, FlagError> {
        self.check_actor(actor)?;
        let mut state = self.state.write();
        let value = !state.get(flag);
        state.set(flag, value);
        drop(state);
        tracing::info!(flag = %flag, value, actor = %actor.email, "feature flag toggled");
        Ok(value)
    }

    /// Restore every flag to the defaults this store was built with. Dev only.
    pub fn reset_all(&self, actor: &Identity) -> Result<(), FlagError> {
        self.check_actor(actor)?;
        *self.state.write() = self.defaults;
        tracing::info!(actor = %actor.email, "feature flags reset to defaults");
        Ok(())
    }

    fn check_actor(&self, actor: &Identity) -> Result<(), FlagError> {
        if actor.role == Role::Dev {
            Ok(())
        } else {
            Err(FlagError::MutationDenied(actor.role.to_string()))
        }
    }
}

impl Default for FlagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev() -> Identity {
        Identity::new("acct-dev", "Root", "dev@club.org", Role::Dev, None)
    }

    fn lead() -> Identity {
        Identity::new(
            "acct-lead",
            "Asha Iyer",
            "lead@club.org",
            Role::Lead,
            Some("ai-ml".to_string()),
        )
    }

    #[test]
    fn new_store_holds_documented_defaults() {
        let store = FlagStore::new();
        assert_eq!(store.snapshot(), FeatureFlags::default());
    }

    #[test]
    fn set_by_dev_is_visible_immediately() {
        let store = FlagStore::new();
        store.set(&dev(), Flag::MaintenanceMode, true).unwrap();
        assert!(store.get(Flag::MaintenanceMode));
        assert!(store.snapshot().maintenance_mode);
    }

    #[test]
    fn set_by_non_dev_is_denied() {
        let store = FlagStore::new();
        let err = store.set(&lead(), Flag::MaintenanceMode, true).unwrap_err();
        assert!(matches!(err, FlagError::MutationDenied(_)));
        assert!(!store.get(Flag::MaintenanceMode));
    }

    #[test]
    fn toggle_twice_returns_to_original_value() {
        let store = FlagStore::new();
        let before = store.get(Flag::BlogPosting);

        let flipped = store.toggle(&dev(), Flag::BlogPosting).unwrap();
        assert_eq!(flipped, !before);

        let restored = store.toggle(&dev(), Flag::BlogPosting).unwrap();
        assert_eq!(restored, before);
        assert_eq!(store.get(Flag::BlogPosting), before);
    }

    #[test]
    fn toggle_by_non_dev_is_denied() {
        let store = FlagStore::new();
        assert!(store.toggle(&lead(), Flag::BlogPosting).is_err());
    }

    #[test]
    fn reset_all_restores_every_default_exactly() {
        let store = FlagStore::new();
        let actor = dev();
        for flag in Flag::ALL {
            store.toggle(&actor, flag).unwrap();
        }
        assert_ne!(store.snapshot(), FeatureFlags::default());

        store.reset_all(&actor).unwrap();
        assert_eq!(store.snapshot(), FeatureFlags::default());
    }

    #[test]
    fn reset_all_restores_custom_defaults() {
        let mut defaults = FeatureFlags::default();
        defaults.leaderboard_enabled = true;
        let store = FlagStore::with_defaults(defaults);

        store.set(&dev(), Flag::Leaderboard, false).unwrap();
        store.reset_all(&dev()).unwrap();
        assert!(store.get(Flag::Leaderboard));
    }

    #[test]
    fn restore_keeps_reset_target_separate_from_state() {
        let mut current = FeatureFlags::default();
        current.maintenance_mode = true;
        let store = FlagStore::restore(FeatureFlags::default(), current);

        assert!(store.get(Flag::MaintenanceMode));
        store.reset_all(&dev()).unwrap();
        assert!(!store.get(Flag::MaintenanceMode));
    }
}
