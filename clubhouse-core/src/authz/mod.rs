//! Permission evaluation: actions, decisions, and the single evaluator

mod action;
mod decision;
mod evaluate;

pub use action::Action;
pub use decision::{Decision, DenyReason};
pub use evaluate::{ActionContext, authorize, authorize_public};
