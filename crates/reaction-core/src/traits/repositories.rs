//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{ReactionMap, ReactionRecord, ReactionView, Subscription, Topic};
use crate::error::DomainError;
use crate::query::{QueryOpt, SubsQuery};
use crate::value_objects::{Revision, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

/// Durable reaction records plus the aggregated read views over them
///
/// Writes to one `(topic, seq, user)` key are atomic; writes to different
/// keys need no coordination. Reads never block writers.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert or replace the record for `(topic, seq, user)`
    ///
    /// An existing record gets the new `content` and `revision`; its
    /// `created_at` is kept. The revision is stored as given.
    async fn save(&self, record: &ReactionRecord) -> RepoResult<()>;

    /// Find the record for a key
    async fn find(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<Option<ReactionRecord>>;

    /// Remove the record for a key; missing keys are not an error
    async fn delete(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<()>;

    /// Aggregated reaction groups for a topic, keyed by message
    ///
    /// `opts` must carry `since` and/or `before`; anything else fails with
    /// `DomainError::InvalidQuery` whether or not the topic has data.
    async fn get_all(
        &self,
        topic: &str,
        caller: UserId,
        view: ReactionView,
        opts: Option<&QueryOpt>,
    ) -> RepoResult<ReactionMap>;

    /// Highest reaction revision in a topic, zero when it has none
    async fn max_revision(&self, topic: &str) -> RepoResult<Revision>;

    /// Highest reaction revision across the whole store
    async fn latest_revision(&self) -> RepoResult<Revision>;
}

// ============================================================================
// Topic Repository
// ============================================================================

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Find topic by name; an unknown topic is `Ok(None)`
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Topic>>;

    /// Create a new topic
    ///
    /// A topic with an owner is stored together with the owner's
    /// subscription in one atomic write.
    async fn create(&self, topic: &Topic) -> RepoResult<()>;

    /// Record the sequence id of the latest message
    async fn update_seq(&self, name: &str, seq_id: i32) -> RepoResult<()>;
}

// ============================================================================
// Subscription Repository
// ============================================================================

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Subscribe a user to a topic; subscribing twice is a no-op
    async fn create(&self, sub: &Subscription) -> RepoResult<()>;

    /// Find a single subscription
    async fn find(&self, topic: &str, user: UserId) -> RepoResult<Option<Subscription>>;

    /// List a user's subscriptions
    ///
    /// Every returned subscription carries the topic's current reaction
    /// high-water mark.
    async fn topics_for_user(&self, user: UserId, query: &SubsQuery) -> RepoResult<Vec<Subscription>>;
}
