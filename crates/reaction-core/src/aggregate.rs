//! Aggregation engine
//!
//! Turns a topic's reaction records into per-message reaction groups:
//! partition by `(seq, content)`, count members, take the highest member
//! revision, filter by the revision window, order newest first, apply the
//! limit across the whole topic, then shape each group for the requested view.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::entities::{ReactionGroup, ReactionMap, ReactionRecord, ReactionView};
use crate::query::RevisionWindow;
use crate::value_objects::UserId;

/// Result order: revision descending, then `(seq, content)` ascending
pub fn group_order(a: &ReactionGroup, b: &ReactionGroup) -> Ordering {
    b.revision
        .cmp(&a.revision)
        .then_with(|| a.seq.cmp(&b.seq))
        .then_with(|| a.content.cmp(&b.content))
}

/// Aggregate one topic's records
///
/// `records` must all belong to the same topic. Each group's `count` and
/// `users` are built from the same pass over `records`.
pub fn aggregate<'a, I>(
    records: I,
    caller: UserId,
    view: ReactionView,
    window: &RevisionWindow,
) -> ReactionMap
where
    I: IntoIterator<Item = &'a ReactionRecord>,
{
    if window.is_empty() {
        return ReactionMap::new();
    }

    let mut partitions: BTreeMap<(i32, &str), ReactionGroup> = BTreeMap::new();
    for record in records {
        let group = partitions
            .entry((record.seq, record.content.as_str()))
            .or_insert_with(|| ReactionGroup {
                seq: record.seq,
                content: record.content.clone(),
                count: 0,
                users: Vec::new(),
                revision: record.revision,
            });
        group.count += 1;
        group.users.push(record.user);
        group.revision = group.revision.max(record.revision);
    }

    let mut groups: Vec<ReactionGroup> = partitions
        .into_values()
        .filter(|g| window.contains(g.revision))
        .map(|mut g| {
            g.users.sort_unstable();
            g
        })
        .collect();

    groups.sort_by(group_order);
    if let Some(limit) = window.limit() {
        groups.truncate(limit);
    }

    collect_groups(groups, caller, view)
}

/// Shape already-ordered groups and key them by message
///
/// Backends that filter, order and limit in storage feed their rows through
/// here so both backends return the same structure.
pub fn collect_groups<I>(groups: I, caller: UserId, view: ReactionView) -> ReactionMap
where
    I: IntoIterator<Item = ReactionGroup>,
{
    let mut map = ReactionMap::new();
    for group in groups {
        map.entry(group.seq)
            .or_default()
            .push(group.into_view(caller, view));
    }
    map
}
