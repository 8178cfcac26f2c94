//! Reaction entities - stored reaction records and derived reaction groups

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Revision, UserId};

/// Maximum length of a reaction payload, in characters
pub const MAX_CONTENT_CHARS: usize = 64;

/// One user's reaction to one message
///
/// At most one record exists per `(topic, seq, user)`. Saving the same key
/// again replaces `content` and `revision`; `created_at` is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub topic: String,
    pub seq: i32,
    pub user: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub revision: Revision,
}

impl ReactionRecord {
    /// Create a new ReactionRecord stamped with the current time
    pub fn new(
        topic: impl Into<String>,
        seq: i32,
        user: UserId,
        content: impl Into<String>,
        revision: Revision,
    ) -> Self {
        Self {
            topic: topic.into(),
            seq,
            user,
            content: content.into(),
            created_at: Utc::now(),
            revision,
        }
    }

    /// Check required fields before the record is persisted
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_key(&self.topic, self.seq, self.user)?;

        if self.content.trim().is_empty() {
            return Err(DomainError::invalid_field("content", "must not be empty"));
        }
        if self.content.chars().count() > MAX_CONTENT_CHARS {
            return Err(DomainError::invalid_field(
                "content",
                format!("must be at most {MAX_CONTENT_CHARS} characters"),
            ));
        }
        if self.revision.is_negative() {
            return Err(DomainError::invalid_field(
                "revision",
                "must be a non-negative integer",
            ));
        }
        Ok(())
    }
}

/// Check the `(topic, seq, user)` triple shared by save and delete
pub fn validate_key(topic: &str, seq: i32, user: UserId) -> Result<(), DomainError> {
    if topic.is_empty() {
        return Err(DomainError::invalid_field("topic", "must not be empty"));
    }
    if seq <= 0 {
        return Err(DomainError::invalid_field("seq", "must be positive"));
    }
    if user.is_zero() {
        return Err(DomainError::invalid_field("user", "must be set"));
    }
    Ok(())
}

/// Read shape requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionView {
    /// Every member of each group is listed
    #[default]
    Listing,
    /// Only the caller's own membership is reported
    Channel,
}

impl ReactionView {
    /// Map the `as_channel` flag used by feed queries
    pub fn from_as_channel(as_channel: bool) -> Self {
        if as_channel {
            Self::Channel
        } else {
            Self::Listing
        }
    }

    pub fn is_channel(self) -> bool {
        matches!(self, Self::Channel)
    }
}

/// All users who attached the same content to the same message
///
/// `revision` is the highest revision among the members, so any member
/// change moves the whole group past a client's sync cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionGroup {
    pub seq: i32,
    pub content: String,
    pub count: i64,
    pub users: Vec<UserId>,
    pub revision: Revision,
}

impl ReactionGroup {
    /// Check whether `user` holds this reaction
    pub fn has_member(&self, user: UserId) -> bool {
        self.users.contains(&user)
    }

    /// Reduce the group to the requested view
    ///
    /// `count` always keeps the true membership size.
    #[must_use]
    pub fn into_view(mut self, caller: UserId, view: ReactionView) -> Self {
        if view.is_channel() {
            let mine = self.has_member(caller);
            self.users.clear();
            if mine {
                self.users.push(caller);
            }
        }
        self
    }
}

/// Groups keyed by message sequence id, each list in result order
pub type ReactionMap = BTreeMap<i32, Vec<ReactionGroup>>;
