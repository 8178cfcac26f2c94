//! Service context - dependency container for services
//!
//! Holds the repositories, the revision source, the per-topic write locks and
//! the per-operation deadline.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reaction_common::auth::JwtService;
use reaction_common::SyncConfig;
use reaction_core::{
    AtomicRevisionSource, DomainError, ReactionRepository, RepoResult, RevisionSource,
    SubscriptionRepository, TopicRepository,
};
use super::error::{ServiceError, ServiceResult};
use super::locks::TopicWriteLocks;

const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    reaction_repo: Arc<dyn ReactionRepository>,
    topic_repo: Arc<dyn TopicRepository>,
    subscription_repo: Arc<dyn SubscriptionRepository>,

    revisions: Arc<dyn RevisionSource>,
    write_locks: Arc<TopicWriteLocks>,
    jwt_service: Arc<JwtService>,
    sync: SyncConfig,
    operation_timeout: Duration,
}

impl ServiceContext {
    // === Repositories ===

    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    pub fn topic_repo(&self) -> &dyn TopicRepository {
        self.topic_repo.as_ref()
    }

    pub fn subscription_repo(&self) -> &dyn SubscriptionRepository {
        self.subscription_repo.as_ref()
    }

    // === Services ===

    /// Supplier of revisions for new reaction writes
    pub fn revisions(&self) -> &dyn RevisionSource {
        self.revisions.as_ref()
    }

    /// Locks held while a reaction write draws its revision and commits
    pub fn write_locks(&self) -> &TopicWriteLocks {
        self.write_locks.as_ref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn sync_config(&self) -> SyncConfig {
        self.sync
    }

    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout
    }

    /// Run a storage call under the operation deadline
    ///
    /// An expired deadline drops the call and reports `DomainError::Timeout`.
    /// Writes go through [`Self::timed_write`] instead.
    pub async fn timed<T, F>(&self, op: F) -> ServiceResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, op).await {
            Ok(result) => result.map_err(ServiceError::from),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.operation_timeout.as_millis() as u64,
                    "Storage call timed out"
                );
                Err(DomainError::Timeout.into())
            }
        }
    }

    /// Run a storage write under the operation deadline
    ///
    /// A dropped write may still have committed, so on expiry `applied` is
    /// run under a fresh deadline to read the stored state back. The write
    /// succeeds if that state is confirmed; otherwise the caller gets
    /// `DomainError::WriteUnconfirmed`. Saves and deletes are idempotent, so
    /// retrying an unconfirmed write is safe.
    pub async fn timed_write<F, C>(&self, op: F, applied: C) -> ServiceResult<()>
    where
        F: Future<Output = RepoResult<()>>,
        C: Future<Output = RepoResult<bool>>,
    {
        let timeout_ms = self.operation_timeout.as_millis() as u64;
        if let Ok(result) = tokio::time::timeout(self.operation_timeout, op).await {
            return result.map_err(ServiceError::from);
        }

        match tokio::time::timeout(self.operation_timeout, applied).await {
            Ok(Ok(true)) => {
                tracing::warn!(timeout_ms, "Storage write timed out but was applied");
                Ok(())
            }
            Ok(Ok(false)) => {
                tracing::warn!(timeout_ms, "Storage write timed out and is not visible");
                Err(DomainError::WriteUnconfirmed.into())
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    timeout_ms,
                    error = %e,
                    "Storage write timed out and could not be checked"
                );
                Err(DomainError::WriteUnconfirmed.into())
            }
            Err(_) => {
                tracing::warn!(timeout_ms, "Storage write timed out and its check timed out");
                Err(DomainError::WriteUnconfirmed.into())
            }
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("current_revision", &self.revisions.current())
            .field("operation_timeout", &self.operation_timeout)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    topic_repo: Option<Arc<dyn TopicRepository>>,
    subscription_repo: Option<Arc<dyn SubscriptionRepository>>,
    revisions: Option<Arc<dyn RevisionSource>>,
    jwt_service: Option<Arc<JwtService>>,
    sync: SyncConfig,
    operation_timeout: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            reaction_repo: None,
            topic_repo: None,
            subscription_repo: None,
            revisions: None,
            jwt_service: None,
            sync: SyncConfig::default(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Use one store for reactions, topics and subscriptions
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: ReactionRepository + TopicRepository + SubscriptionRepository + 'static,
    {
        self.reaction_repo(store.clone())
            .topic_repo(store.clone())
            .subscription_repo(store)
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn topic_repo(mut self, repo: Arc<dyn TopicRepository>) -> Self {
        self.topic_repo = Some(repo);
        self
    }

    pub fn subscription_repo(mut self, repo: Arc<dyn SubscriptionRepository>) -> Self {
        self.subscription_repo = Some(repo);
        self
    }

    pub fn revision_source(mut self, source: Arc<dyn RevisionSource>) -> Self {
        self.revisions = Some(source);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn sync_config(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }

    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Build the ServiceContext
    ///
    /// Without an explicit revision source, revisions start at 1.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            topic_repo: self
                .topic_repo
                .ok_or_else(|| ServiceError::validation("topic_repo is required"))?,
            subscription_repo: self
                .subscription_repo
                .ok_or_else(|| ServiceError::validation("subscription_repo is required"))?,
            revisions: self
                .revisions
                .unwrap_or_else(|| Arc::new(AtomicRevisionSource::new())),
            write_locks: Arc::new(TopicWriteLocks::new()),
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            sync: self.sync,
            operation_timeout: self.operation_timeout,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
