//! Reaction service
//!
//! Puts, removes and lists reactions. Every call first checks that the topic
//! exists. Writes hold the topic's write lock from drawing the revision until
//! the commit, so a client syncing with `since` never skips a reaction.

use reaction_core::{
    DomainError, QueryOpt, ReactionRecord, ReactionView, Revision, RevisionWindow, Topic, UserId,
};
use tracing::{debug, info, instrument};

use crate::dto::{HighWaterResponse, ReactionListResponse, ReactionResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Put the caller's reaction on a message, replacing any earlier one
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        topic: &str,
        seq: i32,
        caller: UserId,
        content: String,
    ) -> ServiceResult<ReactionResponse> {
        self.require_topic(topic).await?;

        // Reject bad input before a revision is spent on it
        let mut record = ReactionRecord::new(topic, seq, caller, content, Revision::ZERO);
        record.validate()?;

        let _guard = self.ctx.write_locks().acquire(topic).await;
        record.revision = self.ctx.revisions().next_revision();
        self.write_record(&record).await?;

        info!(
            topic = %record.topic,
            seq = record.seq,
            user = %record.user,
            revision = %record.revision,
            "Reaction saved"
        );

        Ok(ReactionResponse::from(&record))
    }

    /// Store a record whose revision was assigned by the caller
    #[instrument(skip(self, record), fields(topic = %record.topic, seq = record.seq))]
    pub async fn save(&self, record: ReactionRecord) -> ServiceResult<ReactionResponse> {
        self.require_topic(&record.topic).await?;
        record.validate()?;

        let _guard = self.ctx.write_locks().acquire(&record.topic).await;
        self.write_record(&record).await?;
        self.ctx.revisions().observe(record.revision);

        info!(
            topic = %record.topic,
            seq = record.seq,
            user = %record.user,
            revision = %record.revision,
            "Reaction saved"
        );

        Ok(ReactionResponse::from(record))
    }

    /// Remove the caller's reaction from a message
    ///
    /// Removing a reaction that does not exist succeeds.
    #[instrument(skip(self))]
    pub async fn unreact(&self, topic: &str, seq: i32, caller: UserId) -> ServiceResult<()> {
        self.require_topic(topic).await?;

        let repo = self.ctx.reaction_repo();
        let _guard = self.ctx.write_locks().acquire(topic).await;
        self.ctx
            .timed_write(repo.delete(topic, seq, caller), async {
                let stored = repo.find(topic, seq, caller).await?;
                Ok::<_, DomainError>(stored.is_none())
            })
            .await?;

        info!(topic = %topic, seq = seq, user = %caller, "Reaction removed");

        Ok(())
    }

    /// Aggregated reactions of a topic inside a revision window
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        topic: &str,
        caller: UserId,
        view: ReactionView,
        opts: Option<QueryOpt>,
    ) -> ServiceResult<ReactionListResponse> {
        self.require_topic(topic).await?;

        if let Err(e) = RevisionWindow::from_opts(opts.as_ref()) {
            debug!(topic = %topic, error = %e, "Rejected reaction query");
            return Err(e.into());
        }

        let map = self
            .ctx
            .timed(
                self.ctx
                    .reaction_repo()
                    .get_all(topic, caller, view, opts.as_ref()),
            )
            .await?;

        Ok(ReactionListResponse::from(map))
    }

    /// Highest reaction revision in a topic
    #[instrument(skip(self))]
    pub async fn max_revision(&self, topic: &str) -> ServiceResult<HighWaterResponse> {
        self.require_topic(topic).await?;

        let revision = self
            .ctx
            .timed(self.ctx.reaction_repo().max_revision(topic))
            .await?;

        Ok(HighWaterResponse {
            topic: topic.to_string(),
            revision: revision.into_inner(),
        })
    }

    // === Helper Methods ===

    /// Save `record`; a timed-out save counts if the stored row matches it
    async fn write_record(&self, record: &ReactionRecord) -> ServiceResult<()> {
        let repo = self.ctx.reaction_repo();
        self.ctx
            .timed_write(repo.save(record), async {
                let stored = repo.find(&record.topic, record.seq, record.user).await?;
                Ok::<_, DomainError>(stored.is_some_and(|stored| {
                    stored.revision == record.revision && stored.content == record.content
                }))
            })
            .await
    }

    async fn require_topic(&self, topic: &str) -> ServiceResult<Topic> {
        self.ctx
            .timed(self.ctx.topic_repo().find_by_name(topic))
            .await?
            .ok_or_else(|| DomainError::TopicNotFound(topic.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use reaction_common::auth::JwtService;
    use reaction_core::{
        AtomicRevisionSource, ReactionMap, ReactionRepository, RepoResult, TopicRepository,
    };
    use reaction_db::MemoryStore;

    use super::*;
    use crate::services::{ServiceContextBuilder, ServiceError};

    const TOPIC: &str = "grpReactions";

    async fn context() -> ServiceContext {
        let store = Arc::new(MemoryStore::new());
        TopicRepository::create(store.as_ref(), &Topic::new(TOPIC, None))
            .await
            .unwrap();
        ServiceContextBuilder::new()
            .store(store)
            .jwt_service(Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900)))
            .build()
            .unwrap()
    }

    fn alice() -> UserId {
        UserId::new(1)
    }

    fn bob() -> UserId {
        UserId::new(2)
    }

    #[derive(Clone, Copy)]
    enum Stall {
        BeforeWrite,
        AfterWrite,
    }

    /// Reaction store whose saves for one user are delayed
    struct DelayedStore {
        inner: Arc<MemoryStore>,
        user: UserId,
        delay: Duration,
        stall: Stall,
    }

    #[async_trait]
    impl ReactionRepository for DelayedStore {
        async fn save(&self, record: &ReactionRecord) -> RepoResult<()> {
            if record.user != self.user {
                return ReactionRepository::save(self.inner.as_ref(), record).await;
            }
            match self.stall {
                Stall::BeforeWrite => {
                    tokio::time::sleep(self.delay).await;
                    ReactionRepository::save(self.inner.as_ref(), record).await
                }
                Stall::AfterWrite => {
                    ReactionRepository::save(self.inner.as_ref(), record).await?;
                    tokio::time::sleep(self.delay).await;
                    Ok(())
                }
            }
        }

        async fn find(
            &self,
            topic: &str,
            seq: i32,
            user: UserId,
        ) -> RepoResult<Option<ReactionRecord>> {
            ReactionRepository::find(self.inner.as_ref(), topic, seq, user).await
        }

        async fn delete(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<()> {
            ReactionRepository::delete(self.inner.as_ref(), topic, seq, user).await
        }

        async fn get_all(
            &self,
            topic: &str,
            caller: UserId,
            view: ReactionView,
            opts: Option<&QueryOpt>,
        ) -> RepoResult<ReactionMap> {
            ReactionRepository::get_all(self.inner.as_ref(), topic, caller, view, opts).await
        }

        async fn max_revision(&self, topic: &str) -> RepoResult<Revision> {
            ReactionRepository::max_revision(self.inner.as_ref(), topic).await
        }

        async fn latest_revision(&self) -> RepoResult<Revision> {
            ReactionRepository::latest_revision(self.inner.as_ref()).await
        }
    }

    async fn delayed_context(stall: Stall, delay: Duration, timeout: Duration) -> ServiceContext {
        let inner = Arc::new(MemoryStore::new());
        TopicRepository::create(inner.as_ref(), &Topic::new(TOPIC, None))
            .await
            .unwrap();
        let delayed = DelayedStore {
            inner: Arc::clone(&inner),
            user: alice(),
            delay,
            stall,
        };
        ServiceContextBuilder::new()
            .store(inner)
            .reaction_repo(Arc::new(delayed))
            .jwt_service(Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900)))
            .operation_timeout(timeout)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_react_assigns_increasing_revisions() {
        let ctx = context().await;
        let service = ReactionService::new(&ctx);

        let first = service.react(TOPIC, 5, alice(), "👍".into()).await.unwrap();
        let second = service.react(TOPIC, 5, bob(), "👍".into()).await.unwrap();
        assert_eq!(first.revision, 1);
        assert_eq!(second.revision, 2);

        let list = service
            .list(TOPIC, alice(), ReactionView::Listing, Some(QueryOpt::since(1)))
            .await
            .unwrap();
        let group = &list.reactions[&5][0];
        assert_eq!(group.count, 2);
        assert_eq!(group.revision, 2);
    }

    #[tokio::test]
    async fn test_channel_view_reports_only_caller() {
        let ctx = context().await;
        let service = ReactionService::new(&ctx);
        service.react(TOPIC, 5, alice(), "👍".into()).await.unwrap();
        service.react(TOPIC, 5, bob(), "👍".into()).await.unwrap();

        let list = service
            .list(TOPIC, alice(), ReactionView::Channel, Some(QueryOpt::since(1)))
            .await
            .unwrap();
        let group = &list.reactions[&5][0];
        assert_eq!(group.count, 2);
        assert_eq!(group.users, vec![alice().to_string()]);

        let outsider = service
            .list(TOPIC, UserId::new(3), ReactionView::Channel, Some(QueryOpt::since(1)))
            .await
            .unwrap();
        assert!(outsider.reactions[&5][0].users.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_topic() {
        let ctx = context().await;
        let service = ReactionService::new(&ctx);

        let err = service
            .react("grpMissing", 5, alice(), "👍".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::TopicNotFound(_))));

        let err = service.max_revision("grpMissing").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_invalid_content_spends_no_revision() {
        let ctx = context().await;
        let service = ReactionService::new(&ctx);

        let err = service.react(TOPIC, 5, alice(), String::new()).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(ctx.revisions().current(), Revision::ZERO);
    }

    #[tokio::test]
    async fn test_list_requires_bounds() {
        let ctx = context().await;
        let service = ReactionService::new(&ctx);

        let err = service
            .list(TOPIC, alice(), ReactionView::Listing, None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY");

        let err = service
            .list(TOPIC, alice(), ReactionView::Listing, Some(QueryOpt::default()))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_unreact_is_idempotent() {
        let ctx = context().await;
        let service = ReactionService::new(&ctx);
        service.react(TOPIC, 5, alice(), "👍".into()).await.unwrap();
        service.react(TOPIC, 5, bob(), "❤️".into()).await.unwrap();

        service.unreact(TOPIC, 5, bob()).await.unwrap();
        service.unreact(TOPIC, 5, bob()).await.unwrap();

        // High-water follows the records that remain
        let high_water = service.max_revision(TOPIC).await.unwrap();
        assert_eq!(high_water.revision, 1);

        let list = service
            .list(TOPIC, alice(), ReactionView::Listing, Some(QueryOpt::since(1)))
            .await
            .unwrap();
        assert_eq!(list.reactions[&5].len(), 1);
        assert_eq!(list.reactions[&5][0].content, "👍");
    }

    #[tokio::test]
    async fn test_sync_cursor_sees_slow_writes() {
        let ctx = delayed_context(
            Stall::BeforeWrite,
            Duration::from_millis(200),
            Duration::from_secs(5),
        )
        .await;

        let slow = {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                ReactionService::new(&ctx)
                    .react(TOPIC, 5, alice(), "👍".into())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let fast = {
            let ctx = ctx.clone();
            tokio::spawn(async move {
                ReactionService::new(&ctx)
                    .react(TOPIC, 6, bob(), "🎉".into())
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        // A client syncs while alice's write is still in flight
        let service = ReactionService::new(&ctx);
        let reader = UserId::new(3);
        let first = service
            .list(TOPIC, reader, ReactionView::Listing, Some(QueryOpt::since(1)))
            .await
            .unwrap();
        let cursor = first.max_revision().map_or(1, |rev| rev + 1);

        let slow = slow.await.unwrap().unwrap();
        let fast = fast.await.unwrap().unwrap();
        assert_eq!(slow.revision, 1);
        assert_eq!(fast.revision, 2);

        let next = service
            .list(TOPIC, reader, ReactionView::Listing, Some(QueryOpt::since(cursor)))
            .await
            .unwrap();
        let mut synced: Vec<i32> = first
            .reactions
            .keys()
            .chain(next.reactions.keys())
            .copied()
            .collect();
        synced.sort_unstable();
        synced.dedup();
        assert_eq!(synced, vec![5, 6]);
    }

    #[tokio::test]
    async fn test_timed_out_save_that_applied_succeeds() {
        let ctx = delayed_context(
            Stall::AfterWrite,
            Duration::from_secs(5),
            Duration::from_millis(50),
        )
        .await;
        let service = ReactionService::new(&ctx);

        let saved = service.react(TOPIC, 5, alice(), "👍".into()).await.unwrap();
        assert_eq!(saved.revision, 1);

        let list = service
            .list(TOPIC, bob(), ReactionView::Listing, Some(QueryOpt::since(1)))
            .await
            .unwrap();
        assert_eq!(list.reactions[&5][0].count, 1);
    }

    #[tokio::test]
    async fn test_timed_out_save_that_did_not_apply_is_unconfirmed() {
        let ctx = delayed_context(
            Stall::BeforeWrite,
            Duration::from_secs(5),
            Duration::from_millis(50),
        )
        .await;
        let service = ReactionService::new(&ctx);

        let err = service
            .react(TOPIC, 5, alice(), "👍".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::WriteUnconfirmed)));
        assert_eq!(err.status_code(), 503);

        let stored = ctx.reaction_repo().find(TOPIC, 5, alice()).await.unwrap();
        assert!(stored.is_none());

        // Other users are unaffected
        service.react(TOPIC, 5, bob(), "👍".into()).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_advances_revision_source() {
        let store = Arc::new(MemoryStore::new());
        TopicRepository::create(store.as_ref(), &Topic::new(TOPIC, None))
            .await
            .unwrap();
        let ctx = ServiceContextBuilder::new()
            .store(store)
            .revision_source(Arc::new(AtomicRevisionSource::new()))
            .jwt_service(Arc::new(JwtService::new("test-secret-key-that-is-long-enough", 900)))
            .build()
            .unwrap();
        let service = ReactionService::new(&ctx);

        let record = ReactionRecord::new(TOPIC, 5, alice(), "👍", Revision::new(40));
        let saved = service.save(record).await.unwrap();
        assert_eq!(saved.revision, 40);

        let next = service.react(TOPIC, 6, bob(), "🎉".into()).await.unwrap();
        assert_eq!(next.revision, 41);
    }
}
