//! Test fixtures and response shapes

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Unique topic name
pub fn unique_topic() -> String {
    format!("grpTest{}", unique_suffix())
}

#[derive(Debug, Serialize)]
pub struct CreateTopicRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ReactRequest {
    pub content: String,
}

impl ReactRequest {
    pub fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TopicResponse {
    pub name: String,
    pub owner: Option<String>,
    pub seq_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub topic: String,
    pub seq: i32,
    pub user: String,
    pub content: String,
    pub revision: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReactionGroup {
    pub seq: i32,
    pub content: String,
    pub count: i64,
    pub users: Vec<String>,
    pub revision: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReactionList {
    pub reactions: BTreeMap<String, Vec<ReactionGroup>>,
}

impl ReactionList {
    /// Groups of one message, empty when it has none in the window
    pub fn groups(&self, seq: i32) -> &[ReactionGroup] {
        self.reactions
            .get(&seq.to_string())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct HighWater {
    pub topic: String,
    pub revision: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionResponse {
    pub topic: String,
    pub user: String,
    pub max_reaction_revision: i64,
}
