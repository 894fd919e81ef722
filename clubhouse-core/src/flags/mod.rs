//! Feature flags: capability gates, beta gates, and emergency switches

mod store;
mod types;

pub use store::FlagStore;
pub use types::{FeatureFlags, Flag, FlagError};
