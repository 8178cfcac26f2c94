//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! User ids are serialized in their external `usr…` form.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Reaction Responses
// ============================================================================

/// A stored reaction record
#[derive(Debug, Clone, Serialize)]
pub struct ReactionResponse {
    pub topic: String,
    pub seq: i32,
    pub user: String,
    pub content: String,
    pub revision: i64,
    pub created_at: DateTime<Utc>,
}

/// One aggregated reaction group
#[derive(Debug, Clone, Serialize)]
pub struct ReactionGroupResponse {
    pub seq: i32,
    pub content: String,
    pub count: i64,
    pub users: Vec<String>,
    pub revision: i64,
}

/// Reaction groups keyed by message sequence id
#[derive(Debug, Clone, Serialize)]
pub struct ReactionListResponse {
    pub reactions: BTreeMap<i32, Vec<ReactionGroupResponse>>,
}

impl ReactionListResponse {
    /// Highest group revision in the response; the next sync cursor is one past it
    pub fn max_revision(&self) -> Option<i64> {
        self.reactions.values().flatten().map(|g| g.revision).max()
    }
}

/// Topic reaction high-water mark
#[derive(Debug, Clone, Serialize)]
pub struct HighWaterResponse {
    pub topic: String,
    pub revision: i64,
}

// ============================================================================
// Topic Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TopicResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub seq_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's subscription, as returned by topic listings
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub topic: String,
    pub user: String,
    pub read_seq_id: i32,
    pub recv_seq_id: i32,
    pub del_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Highest reaction revision in the topic, 0 when it has none
    pub max_reaction_revision: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
    pub backend: String,
}

impl ReadinessResponse {
    pub fn ready(backend: &str, storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
                backend: backend.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
