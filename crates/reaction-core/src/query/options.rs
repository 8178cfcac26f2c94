//! Raw query options

use serde::{Deserialize, Serialize};

use crate::value_objects::Revision;

/// Revision bounds and page size for reaction queries
///
/// At least one of `since` or `before` must be set; see
/// [`RevisionWindow::from_opts`](super::RevisionWindow::from_opts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOpt {
    /// Inclusive lower bound on group revision
    #[serde(default)]
    pub since: Option<Revision>,
    /// Exclusive upper bound on group revision
    #[serde(default)]
    pub before: Option<Revision>,
    /// Maximum number of groups across the whole topic
    #[serde(default)]
    pub limit: Option<u32>,
}

impl QueryOpt {
    pub fn since(since: i64) -> Self {
        Self {
            since: Some(Revision::new(since)),
            ..Self::default()
        }
    }

    pub fn before(before: i64) -> Self {
        Self {
            before: Some(Revision::new(before)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether either revision bound is present
    pub fn is_bounded(&self) -> bool {
        self.since.is_some() || self.before.is_some()
    }
}

/// Filters for listing a user's topics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsQuery {
    /// Only return the subscription to this topic
    #[serde(default)]
    pub topic: Option<String>,
    /// Maximum number of subscriptions returned
    #[serde(default)]
    pub limit: Option<u32>,
}

impl SubsQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            topic: None,
            limit: Some(limit),
        }
    }

    pub fn for_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
            limit: None,
        }
    }
}
