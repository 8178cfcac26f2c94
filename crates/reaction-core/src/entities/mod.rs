//! Domain entities - core business objects

mod reaction;
mod topic;

pub use reaction::{
    validate_key, ReactionGroup, ReactionMap, ReactionRecord, ReactionView,
    MAX_CONTENT_CHARS,
};
pub use topic::{Subscription, Topic};
