//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in reaction-core.

mod error;
mod reaction;
mod subscription;
mod topic;

pub use reaction::PgReactionRepository;
pub use subscription::PgSubscriptionRepository;
pub use topic::PgTopicRepository;
