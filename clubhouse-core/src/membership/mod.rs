//! Join requests, members, and the approval workflow

mod types;
mod workflow;

pub use types::{
    JoinRequest, JoinStatus, Member, MemberStatus, NewJoinRequest, NewMember, ProfilePatch,
};
pub use workflow::MembershipWorkflow;
