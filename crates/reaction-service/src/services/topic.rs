//! Topic service
//!
//! Creates topics, shares them with users and lists a user's topics along
//! with each topic's reaction high-water mark.

use reaction_core::{DomainError, SubsQuery, Subscription, Topic, UserId};
use tracing::{info, instrument};

use crate::dto::{SubscriptionResponse, TopicResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Topic service
pub struct TopicService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TopicService<'a> {
    /// Create a new TopicService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a topic by name
    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> ServiceResult<TopicResponse> {
        let topic = self.require_topic(name).await?;
        Ok(TopicResponse::from(topic))
    }

    /// Create a topic owned by `owner`; the owner is subscribed to it
    #[instrument(skip(self))]
    pub async fn create(&self, owner: UserId, name: String) -> ServiceResult<TopicResponse> {
        let topic = Topic::new(name, Some(owner));
        topic.validate()?;

        // Stores the owner's subscription in the same write
        self.ctx.timed(self.ctx.topic_repo().create(&topic)).await?;

        info!(topic = %topic.name, owner = %owner, "Topic created");

        Ok(TopicResponse::from(topic))
    }

    /// Subscribe `user` to an existing topic
    #[instrument(skip(self))]
    pub async fn share(&self, topic: &str, user: UserId) -> ServiceResult<SubscriptionResponse> {
        self.require_topic(topic).await?;

        let sub = Subscription::new(topic, user);
        self.ctx
            .timed(self.ctx.subscription_repo().create(&sub))
            .await?;

        info!(topic = %topic, user = %user, "Topic shared");

        let stored = self
            .ctx
            .timed(self.ctx.subscription_repo().find(topic, user))
            .await?
            .ok_or_else(|| ServiceError::internal("subscription missing after create"))?;

        Ok(SubscriptionResponse::from(stored))
    }

    /// List the topics `user` is subscribed to
    ///
    /// Each entry carries the topic's highest reaction revision so clients
    /// can tell which topics have reaction changes they have not synced.
    #[instrument(skip(self))]
    pub async fn topics_for_user(
        &self,
        user: UserId,
        query: SubsQuery,
    ) -> ServiceResult<Vec<SubscriptionResponse>> {
        let subs = self
            .ctx
            .timed(self.ctx.subscription_repo().topics_for_user(user, &query))
            .await?;

        Ok(subs.into_iter().map(SubscriptionResponse::from).collect())
    }

    /// Record that a message with sequence id `seq` was posted
    #[instrument(skip(self))]
    pub async fn record_message(&self, topic: &str, seq: i32) -> ServiceResult<()> {
        if seq <= 0 {
            return Err(DomainError::invalid_field("seq", "must be a positive integer").into());
        }

        self.ctx
            .timed(self.ctx.topic_repo().update_seq(topic, seq))
            .await
    }

    // === Helper Methods ===

    async fn require_topic(&self, name: &str) -> ServiceResult<Topic> {
        self.ctx
            .timed(self.ctx.topic_repo().find_by_name(name))
            .await?
            .ok_or_else(|| DomainError::TopicNotFound(name.to_string()).into())
    }
}
