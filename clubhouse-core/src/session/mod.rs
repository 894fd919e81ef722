//! Who is signed in: accounts, identities, and the session holder

mod error;
mod identity;
mod store;

pub use error::AuthError;
pub use identity::{Account, Identity};
pub use store::SessionStore;
