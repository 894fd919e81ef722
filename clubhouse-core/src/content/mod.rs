//! Content records and the approval pipeline

mod item;
mod workflow;

pub use item::{Author, ContentItem, ContentKind, ContentPatch, ContentStatus, NewContent};
pub use workflow::ContentWorkflow;
