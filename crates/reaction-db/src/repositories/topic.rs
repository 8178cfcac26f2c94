//! PostgreSQL implementation of TopicRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use reaction_core::{DomainError, RepoResult, Subscription, Topic, TopicRepository};

use crate::mappers::TopicInsert;
use crate::models::TopicModel;

use super::error::{map_db_error, map_unique_violation};
use super::subscription::insert_subscription;

/// PostgreSQL implementation of TopicRepository
#[derive(Clone)]
pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    /// Create a new PgTopicRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Topic>> {
        let result = sqlx::query_as::<_, TopicModel>(
            r#"
            SELECT name, owner, seq_id, created_at, updated_at
            FROM topics
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Topic::from))
    }

    #[instrument(skip(self, topic), fields(topic = %topic.name))]
    async fn create(&self, topic: &Topic) -> RepoResult<()> {
        topic.validate()?;
        let row = TopicInsert::new(topic);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO topics (name, owner, seq_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(row.name)
        .bind(row.owner)
        .bind(row.seq_id)
        .bind(topic.created_at)
        .bind(topic.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(e, || DomainError::TopicAlreadyExists(topic.name.clone()))
        })?;

        if let Some(owner) = topic.owner {
            insert_subscription(&mut *tx, &Subscription::new(&topic.name, owner))
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_seq(&self, name: &str, seq_id: i32) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE topics SET seq_id = GREATEST(seq_id, $2), updated_at = NOW()
            WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(seq_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::TopicNotFound(name.to_string()));
        }

        Ok(())
    }
}
