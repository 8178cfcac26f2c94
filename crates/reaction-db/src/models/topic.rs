//! Topic and subscription database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for topics table
#[derive(Debug, Clone, FromRow)]
pub struct TopicModel {
    pub name: String,
    pub owner: Option<i64>,
    pub seq_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subscription row joined with its topic's highest reaction revision
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub topic: String,
    pub user_id: i64,
    pub read_seq_id: i32,
    pub recv_seq_id: i32,
    pub del_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub mrr_id: i64,
}
