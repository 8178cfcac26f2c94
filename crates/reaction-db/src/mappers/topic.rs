//! Topic and subscription entity <-> model mappers

use reaction_core::{Revision, Subscription, Topic, UserId};

use crate::models::{SubscriptionModel, TopicModel};

impl From<TopicModel> for Topic {
    fn from(model: TopicModel) -> Self {
        Topic {
            name: model.name,
            owner: model.owner.map(UserId::new),
            seq_id: model.seq_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<SubscriptionModel> for Subscription {
    fn from(model: SubscriptionModel) -> Self {
        Subscription {
            topic: model.topic,
            user: UserId::new(model.user_id),
            read_seq_id: model.read_seq_id,
            recv_seq_id: model.recv_seq_id,
            del_id: model.del_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            reaction_high_water: Revision::new(model.mrr_id),
        }
    }
}

/// Column values for a topic insert
pub struct TopicInsert<'a> {
    pub name: &'a str,
    pub owner: Option<i64>,
    pub seq_id: i32,
}

impl<'a> TopicInsert<'a> {
    pub fn new(topic: &'a Topic) -> Self {
        Self {
            name: &topic.name,
            owner: topic.owner.map(UserId::into_inner),
            seq_id: topic.seq_id,
        }
    }
}

/// Column values for a subscription insert
pub struct SubscriptionInsert<'a> {
    pub topic: &'a str,
    pub user_id: i64,
    pub read_seq_id: i32,
    pub recv_seq_id: i32,
    pub del_id: i32,
}

impl<'a> SubscriptionInsert<'a> {
    pub fn new(sub: &'a Subscription) -> Self {
        Self {
            topic: &sub.topic,
            user_id: sub.user.into_inner(),
            read_seq_id: sub.read_seq_id,
            recv_seq_id: sub.recv_seq_id,
            del_id: sub.del_id,
        }
    }
}
