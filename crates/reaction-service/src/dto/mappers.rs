//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use reaction_core::{ReactionGroup, ReactionMap, ReactionRecord, Subscription, Topic};

use super::responses::{
    ReactionGroupResponse, ReactionListResponse, ReactionResponse, SubscriptionResponse,
    TopicResponse,
};

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&ReactionRecord> for ReactionResponse {
    fn from(record: &ReactionRecord) -> Self {
        Self {
            topic: record.topic.clone(),
            seq: record.seq,
            user: record.user.to_string(),
            content: record.content.clone(),
            revision: record.revision.into_inner(),
            created_at: record.created_at,
        }
    }
}

impl From<ReactionRecord> for ReactionResponse {
    fn from(record: ReactionRecord) -> Self {
        Self::from(&record)
    }
}

impl From<ReactionGroup> for ReactionGroupResponse {
    fn from(group: ReactionGroup) -> Self {
        Self {
            seq: group.seq,
            users: group.users.iter().map(ToString::to_string).collect(),
            content: group.content,
            count: group.count,
            revision: group.revision.into_inner(),
        }
    }
}

impl From<ReactionMap> for ReactionListResponse {
    fn from(map: ReactionMap) -> Self {
        Self {
            reactions: map
                .into_iter()
                .map(|(seq, groups)| (seq, groups.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }
}

// ============================================================================
// Topic Mappers
// ============================================================================

impl From<&Topic> for TopicResponse {
    fn from(topic: &Topic) -> Self {
        Self {
            name: topic.name.clone(),
            owner: topic.owner.map(|id| id.to_string()),
            seq_id: topic.seq_id,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self::from(&topic)
    }
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(sub: &Subscription) -> Self {
        Self {
            topic: sub.topic.clone(),
            user: sub.user.to_string(),
            read_seq_id: sub.read_seq_id,
            recv_seq_id: sub.recv_seq_id,
            del_id: sub.del_id,
            created_at: sub.created_at,
            updated_at: sub.updated_at,
            max_reaction_revision: sub.reaction_high_water.into_inner(),
        }
    }
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self::from(&sub)
    }
}
