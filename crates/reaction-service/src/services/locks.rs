//! Per-topic write serialization
//!
//! A reaction write draws its revision and commits while holding its topic's
//! lock, so revisions in one topic become visible in the order they were
//! drawn. Writes to different topics never wait on each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lazily created async mutex per topic name
#[derive(Debug, Default)]
pub struct TopicWriteLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TopicWriteLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive write access to `topic`
    pub async fn acquire(&self, topic: &str) -> OwnedMutexGuard<()> {
        // The map guard is released before awaiting the topic mutex
        let lock = match self.locks.get(topic) {
            Some(entry) => Arc::clone(entry.value()),
            None => Arc::clone(&self.locks.entry(topic.to_string()).or_default()),
        };
        lock.lock_owned().await
    }
}
