//! Database models - SQLx-compatible structs for PostgreSQL tables

mod reaction;
mod topic;

pub use reaction::{ReactionGroupModel, ReactionModel};
pub use topic::{SubscriptionModel, TopicModel};
