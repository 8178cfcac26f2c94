//! Topic and subscription entities
//!
//! Topics and subscriptions are owned by the surrounding messaging system.
//! Only the fields the reaction store reads or annotates are modelled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Revision, UserId};

/// A named message channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub owner: Option<UserId>,
    /// Sequence id of the latest message
    pub seq_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Topic {
    /// Create a new Topic with no messages yet
    pub fn new(name: impl Into<String>, owner: Option<UserId>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            owner,
            seq_id: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_field("name", "must not be empty"));
        }
        if self.seq_id < 0 {
            return Err(DomainError::invalid_field("seq_id", "must not be negative"));
        }
        Ok(())
    }
}

/// A user's membership in a topic, as returned by topic listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub topic: String,
    pub user: UserId,
    pub read_seq_id: i32,
    pub recv_seq_id: i32,
    pub del_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Highest reaction revision in the topic, zero when it has none.
    /// Filled in by topic listings; never stored.
    #[serde(default)]
    pub reaction_high_water: Revision,
}

impl Subscription {
    /// Create a new Subscription with cleared cursors
    pub fn new(topic: impl Into<String>, user: UserId) -> Self {
        let now = Utc::now();
        Self {
            topic: topic.into(),
            user,
            read_seq_id: 0,
            recv_seq_id: 0,
            del_id: 0,
            created_at: now,
            updated_at: now,
            reaction_high_water: Revision::ZERO,
        }
    }
}
