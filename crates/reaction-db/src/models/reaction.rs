//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub topic: String,
    pub seq_id: i32,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub mrr_id: i64,
}

/// One `(seq_id, content)` group (from the aggregate query)
#[derive(Debug, Clone, FromRow)]
pub struct ReactionGroupModel {
    pub seq_id: i32,
    pub content: String,
    pub count: i64,
    pub users: Vec<i64>,
    pub revision: i64,
}
