//! Reaction entity <-> model mappers

use reaction_core::{ReactionGroup, ReactionRecord, Revision, UserId};

use crate::models::{ReactionGroupModel, ReactionModel};

impl From<ReactionModel> for ReactionRecord {
    fn from(model: ReactionModel) -> Self {
        ReactionRecord {
            topic: model.topic,
            seq: model.seq_id,
            user: UserId::new(model.user_id),
            content: model.content,
            created_at: model.created_at,
            revision: Revision::new(model.mrr_id),
        }
    }
}

impl From<ReactionGroupModel> for ReactionGroup {
    fn from(model: ReactionGroupModel) -> Self {
        ReactionGroup {
            seq: model.seq_id,
            content: model.content,
            count: model.count,
            users: model.users.into_iter().map(UserId::new).collect(),
            revision: Revision::new(model.revision),
        }
    }
}

/// Column values for a reaction upsert
pub struct ReactionInsert<'a> {
    pub topic: &'a str,
    pub seq_id: i32,
    pub user_id: i64,
    pub content: &'a str,
    pub mrr_id: i64,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(record: &'a ReactionRecord) -> Self {
        Self {
            topic: &record.topic,
            seq_id: record.seq,
            user_id: record.user.into_inner(),
            content: &record.content,
            mrr_id: record.revision.into_inner(),
        }
    }
}
