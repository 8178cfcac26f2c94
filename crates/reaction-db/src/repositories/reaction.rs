//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use reaction_core::entities::validate_key;
use reaction_core::{
    collect_groups, QueryOpt, ReactionGroup, ReactionMap, ReactionRecord, ReactionRepository,
    ReactionView, RepoResult, Revision, RevisionWindow, UserId,
};

use crate::mappers::ReactionInsert;
use crate::models::{ReactionGroupModel, ReactionModel};

use super::error::{map_db_error, sql_limit};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, record), fields(topic = %record.topic, seq = record.seq, user = %record.user))]
    async fn save(&self, record: &ReactionRecord) -> RepoResult<()> {
        record.validate()?;
        let row = ReactionInsert::new(record);

        sqlx::query(
            r#"
            INSERT INTO reactions (topic, seq_id, user_id, content, created_at, mrr_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (topic, seq_id, user_id)
            DO UPDATE SET content = EXCLUDED.content, mrr_id = EXCLUDED.mrr_id
            "#,
        )
        .bind(row.topic)
        .bind(row.seq_id)
        .bind(row.user_id)
        .bind(row.content)
        .bind(record.created_at)
        .bind(row.mrr_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<Option<ReactionRecord>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT topic, seq_id, user_id, content, created_at, mrr_id
            FROM reactions
            WHERE topic = $1 AND seq_id = $2 AND user_id = $3
            "#,
        )
        .bind(topic)
        .bind(seq)
        .bind(user.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReactionRecord::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<()> {
        validate_key(topic, seq, user)?;

        sqlx::query(
            r#"
            DELETE FROM reactions WHERE topic = $1 AND seq_id = $2 AND user_id = $3
            "#,
        )
        .bind(topic)
        .bind(seq)
        .bind(user.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all(
        &self,
        topic: &str,
        caller: UserId,
        view: ReactionView,
        opts: Option<&QueryOpt>,
    ) -> RepoResult<ReactionMap> {
        let window = RevisionWindow::from_opts(opts)?;
        if window.is_empty() {
            return Ok(ReactionMap::new());
        }

        // count and users come from the same grouped row, so they always agree.
        let rows = sqlx::query_as::<_, ReactionGroupModel>(
            r#"
            SELECT seq_id,
                   content,
                   COUNT(*) AS count,
                   array_agg(user_id ORDER BY user_id) AS users,
                   MAX(mrr_id) AS revision
            FROM reactions
            WHERE topic = $1
            GROUP BY seq_id, content
            HAVING ($2::BIGINT IS NULL OR MAX(mrr_id) >= $2)
               AND ($3::BIGINT IS NULL OR MAX(mrr_id) < $3)
            ORDER BY revision DESC, seq_id, content COLLATE "C"
            LIMIT $4
            "#,
        )
        .bind(topic)
        .bind(window.since().map(Revision::into_inner))
        .bind(window.before().map(Revision::into_inner))
        .bind(sql_limit(window.limit()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(groups = rows.len(), "Loaded reaction groups");
        Ok(collect_groups(
            rows.into_iter().map(ReactionGroup::from),
            caller,
            view,
        ))
    }

    #[instrument(skip(self))]
    async fn max_revision(&self, topic: &str) -> RepoResult<Revision> {
        let max = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(MAX(mrr_id), 0) FROM reactions WHERE topic = $1
            "#,
        )
        .bind(topic)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Revision::new(max))
    }

    #[instrument(skip(self))]
    async fn latest_revision(&self) -> RepoResult<Revision> {
        let max = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(MAX(mrr_id), 0) FROM reactions
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Revision::new(max))
    }
}
