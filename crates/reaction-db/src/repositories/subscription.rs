//! PostgreSQL implementation of SubscriptionRepository

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::instrument;

use reaction_core::{RepoResult, SubsQuery, Subscription, SubscriptionRepository, UserId};

use crate::mappers::SubscriptionInsert;
use crate::models::SubscriptionModel;

use super::error::map_db_error;

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert a subscription unless it already exists
pub(crate) async fn insert_subscription<'e, E>(executor: E, sub: &Subscription) -> sqlx::Result<()>
where
    E: PgExecutor<'e>,
{
    let row = SubscriptionInsert::new(sub);

    sqlx::query(
        r#"
        INSERT INTO subscriptions
            (topic, user_id, read_seq_id, recv_seq_id, del_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (topic, user_id) DO NOTHING
        "#,
    )
    .bind(row.topic)
    .bind(row.user_id)
    .bind(row.read_seq_id)
    .bind(row.recv_seq_id)
    .bind(row.del_id)
    .bind(sub.created_at)
    .bind(sub.updated_at)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self, sub), fields(topic = %sub.topic, user = %sub.user))]
    async fn create(&self, sub: &Subscription) -> RepoResult<()> {
        insert_subscription(&self.pool, sub)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find(&self, topic: &str, user: UserId) -> RepoResult<Option<Subscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(
            r#"
            SELECT s.topic, s.user_id, s.read_seq_id, s.recv_seq_id, s.del_id,
                   s.created_at, s.updated_at,
                   COALESCE((SELECT MAX(r.mrr_id) FROM reactions r WHERE r.topic = s.topic), 0)
                       AS mrr_id
            FROM subscriptions s
            WHERE s.topic = $1 AND s.user_id = $2 AND s.deleted_at IS NULL
            "#,
        )
        .bind(topic)
        .bind(user.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Subscription::from))
    }

    #[instrument(skip(self))]
    async fn topics_for_user(&self, user: UserId, query: &SubsQuery) -> RepoResult<Vec<Subscription>> {
        // One index probe on reactions_topic_mrr per listed topic
        let results = sqlx::query_as::<_, SubscriptionModel>(
            r#"
            SELECT s.topic, s.user_id, s.read_seq_id, s.recv_seq_id, s.del_id,
                   s.created_at, s.updated_at,
                   COALESCE(hw.mrr_id, 0) AS mrr_id
            FROM subscriptions s
            LEFT JOIN LATERAL (
                SELECT MAX(r.mrr_id) AS mrr_id
                FROM reactions r
                WHERE r.topic = s.topic
            ) hw ON TRUE
            WHERE s.user_id = $1
              AND s.deleted_at IS NULL
              AND ($2::TEXT IS NULL OR s.topic = $2)
            ORDER BY s.updated_at DESC, s.topic
            LIMIT $3
            "#,
        )
        .bind(user.into_inner())
        .bind(query.topic.as_deref())
        .bind(query.limit.map(i64::from))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Subscription::from).collect())
    }
}
