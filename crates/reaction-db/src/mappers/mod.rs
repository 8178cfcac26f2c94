//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - `*Insert` structs: prepare entity data for database writes

mod reaction;
mod topic;

pub use reaction::ReactionInsert;
pub use topic::{SubscriptionInsert, TopicInsert};
