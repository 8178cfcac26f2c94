//! Value objects - immutable types that represent domain concepts

mod revision;
mod user_id;

pub use revision::{AtomicRevisionSource, Revision, RevisionSource};
pub use user_id::{UserId, UserIdParseError};
