//! Login, logout, and the current-identity slot
//!
//! One identity is signed in at a time. The store holds the account
//! directory and a shared handle to the flag store so the login-disabled
//! emergency switch is consulted live on every attempt.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::flags::{Flag, FlagStore};
use crate::role::Role;
use crate::session::error::AuthError;
use crate::session::identity::{Account, Identity};

pub struct SessionStore {
    accounts: Vec<Account>,
    flags: Arc<FlagStore>,
    current: RwLock<Option<Identity>>,
}

impl SessionStore {
    pub fn new(accounts: Vec<Account>, flags: Arc<FlagStore>) -> Self {
        Self {
            accounts,
            flags,
            current: RwLock::new(None),
        }
    }

    /// Authenticate by email and secret and make the result current.
    ///
    /// Checks run in a fixed order: email resolution, then the
    /// login-disabled switch, then the secret. Dev accounts bypass the
    /// switch so the person able to clear it is never locked out.
    pub fn login(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email)
            .ok_or_else(|| AuthError::UnknownIdentity(email.to_string()))?;

        self.check_suspension(account.role)?;

        if account.secret != secret {
            tracing::warn!(email = %email, "login refused: bad credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let identity = account.identity();
        tracing::info!(email = %identity.email, role = %identity.role, "login");
        *self.current.write() = Some(identity.clone());
        Ok(identity)
    }

    /// Sign in as the first account holding `role`, without a secret.
    ///
    /// Demo convenience for walking the app under each role. The
    /// login-disabled switch applies exactly as it does to [`login`].
    ///
    /// [`login`]: SessionStore::login
    pub fn login_as(&self, role: Role) -> Result<Identity, AuthError> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.role == role)
            .ok_or(AuthError::NoAccountForRole(role))?;

        self.check_suspension(account.role)?;

        let identity = account.identity();
        tracing::info!(email = %identity.email, role = %identity.role, "login (role shortcut)");
        *self.current.write() = Some(identity.clone());
        Ok(identity)
    }

    /// Clear the current identity, returning whoever was signed in
    pub fn logout(&self) -> Option<Identity> {
        let previous = self.current.write().take();
        if let Some(identity) = &previous {
            tracing::info!(email = %identity.email, "logout");
        }
        previous
    }

    /// The currently signed-in identity, if any
    pub fn current(&self) -> Option<Identity> {
        self.current.read().clone()
    }

    fn check_suspension(&self, role: Role) -> Result<(), AuthError> {
        if role != Role::Dev && self.flags.get(Flag::LoginDisabled) {
            tracing::warn!(role = %role, "login refused: logins suspended");
            return Err(AuthError::LoginsSuspended);
        }
        Ok(())
    }
}
