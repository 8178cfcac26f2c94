//! DashMap-backed store implementing all repository traits

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, instrument};

use reaction_core::entities::validate_key;
use reaction_core::{
    aggregate, DomainError, QueryOpt, ReactionMap, ReactionRecord, ReactionRepository,
    ReactionView, RepoResult, Revision, RevisionWindow, SubsQuery, Subscription,
    SubscriptionRepository, Topic, TopicRepository, UserId,
};

/// Reactions of one topic keyed by `(seq, user)`
type TopicReactions = DashMap<(i32, UserId), ReactionRecord>;

/// In-memory reaction, topic and subscription tables
///
/// Reactions are grouped per topic and keyed by `(seq, user)` inside it, so
/// topic reads touch only that topic. Each write is a single entry-API
/// mutation, so it is atomic per key and never locks other keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    reactions: DashMap<String, Arc<TopicReactions>>,
    topics: DashMap<String, Topic>,
    subscriptions: DashMap<(String, UserId), Subscription>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reaction records
    pub fn reaction_count(&self) -> usize {
        self.reactions.iter().map(|entry| entry.value().len()).sum()
    }

    fn topic_table(&self, topic: &str) -> Option<Arc<TopicReactions>> {
        self.reactions.get(topic).map(|entry| Arc::clone(entry.value()))
    }

    fn topic_table_or_create(&self, topic: &str) -> Arc<TopicReactions> {
        match self.topic_table(topic) {
            Some(table) => table,
            None => Arc::clone(&self.reactions.entry(topic.to_string()).or_default()),
        }
    }

    fn topic_records(&self, topic: &str) -> Vec<ReactionRecord> {
        self.topic_table(topic)
            .map(|table| table.iter().map(|entry| entry.value().clone()).collect())
            .unwrap_or_default()
    }

    fn high_water(&self, topic: &str) -> Revision {
        self.topic_table(topic)
            .and_then(|table| table.iter().map(|entry| entry.value().revision).max())
            .unwrap_or(Revision::ZERO)
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    #[instrument(skip(self, record), fields(topic = %record.topic, seq = record.seq, user = %record.user))]
    async fn save(&self, record: &ReactionRecord) -> RepoResult<()> {
        record.validate()?;

        self.topic_table_or_create(&record.topic)
            .entry((record.seq, record.user))
            .and_modify(|existing| {
                existing.content.clone_from(&record.content);
                existing.revision = record.revision;
            })
            .or_insert_with(|| record.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<Option<ReactionRecord>> {
        Ok(self
            .topic_table(topic)
            .and_then(|table| table.get(&(seq, user)).map(|entry| entry.value().clone())))
    }

    #[instrument(skip(self))]
    async fn delete(&self, topic: &str, seq: i32, user: UserId) -> RepoResult<()> {
        validate_key(topic, seq, user)?;
        if let Some(table) = self.topic_table(topic) {
            table.remove(&(seq, user));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all(
        &self,
        topic: &str,
        caller: UserId,
        view: ReactionView,
        opts: Option<&QueryOpt>,
    ) -> RepoResult<ReactionMap> {
        let window = RevisionWindow::from_opts(opts)?;
        let records = self.topic_records(topic);
        debug!(records = records.len(), "Aggregating reaction records");

        Ok(aggregate(&records, caller, view, &window))
    }

    #[instrument(skip(self))]
    async fn max_revision(&self, topic: &str) -> RepoResult<Revision> {
        Ok(self.high_water(topic))
    }

    #[instrument(skip(self))]
    async fn latest_revision(&self) -> RepoResult<Revision> {
        Ok(self
            .reactions
            .iter()
            .filter_map(|table| table.value().iter().map(|entry| entry.value().revision).max())
            .max()
            .unwrap_or(Revision::ZERO))
    }
}

#[async_trait]
impl TopicRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Topic>> {
        Ok(self.topics.get(name).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, topic), fields(topic = %topic.name))]
    async fn create(&self, topic: &Topic) -> RepoResult<()> {
        topic.validate()?;

        match self.topics.entry(topic.name.clone()) {
            Entry::Occupied(_) => Err(DomainError::TopicAlreadyExists(topic.name.clone())),
            Entry::Vacant(slot) => {
                // Owner subscription lands while the topic slot is still held
                if let Some(owner) = topic.owner {
                    self.subscriptions
                        .entry((topic.name.clone(), owner))
                        .or_insert_with(|| Subscription::new(&topic.name, owner));
                }
                slot.insert(topic.clone());
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn update_seq(&self, name: &str, seq_id: i32) -> RepoResult<()> {
        let mut topic = self
            .topics
            .get_mut(name)
            .ok_or_else(|| DomainError::TopicNotFound(name.to_string()))?;
        topic.seq_id = topic.seq_id.max(seq_id);
        topic.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryStore {
    #[instrument(skip(self, sub), fields(topic = %sub.topic, user = %sub.user))]
    async fn create(&self, sub: &Subscription) -> RepoResult<()> {
        self.subscriptions
            .entry((sub.topic.clone(), sub.user))
            .or_insert_with(|| Subscription {
                reaction_high_water: Revision::ZERO,
                ..sub.clone()
            });
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(&self, topic: &str, user: UserId) -> RepoResult<Option<Subscription>> {
        let Some(sub) = self
            .subscriptions
            .get(&(topic.to_string(), user))
            .map(|entry| entry.value().clone())
        else {
            return Ok(None);
        };

        Ok(Some(Subscription {
            reaction_high_water: self.high_water(topic),
            ..sub
        }))
    }

    #[instrument(skip(self))]
    async fn topics_for_user(&self, user: UserId, query: &SubsQuery) -> RepoResult<Vec<Subscription>> {
        let mut subs: Vec<Subscription> = self
            .subscriptions
            .iter()
            .filter(|entry| entry.key().1 == user)
            .filter(|entry| query.topic.as_deref().map_or(true, |t| entry.key().0 == t))
            .map(|entry| entry.value().clone())
            .collect();

        subs.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.topic.cmp(&b.topic))
        });
        if let Some(limit) = query.limit {
            subs.truncate(limit as usize);
        }

        for sub in &mut subs {
            sub.reaction_high_water = self.high_water(&sub.topic);
        }

        Ok(subs)
    }
}
