//! # reaction-core
//!
//! Domain layer for the reaction store: reaction records, derived reaction
//! groups, revision windows used as sync cursors, and the repository traits
//! that storage backends implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod aggregate;
pub mod entities;
pub mod error;
pub mod query;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use aggregate::{aggregate, collect_groups, group_order};
pub use entities::{
    ReactionGroup, ReactionMap, ReactionRecord, ReactionView, Subscription, Topic,
};
pub use error::DomainError;
pub use query::{QueryOpt, RevisionWindow, SubsQuery};
pub use traits::{ReactionRepository, RepoResult, SubscriptionRepository, TopicRepository};
pub use value_objects::{
    AtomicRevisionSource, Revision, RevisionSource, UserId, UserIdParseError,
};
