//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, path parameters and
//! reaction sync windows.

mod auth;
mod path;
mod sync;
mod validated;

pub use auth::AuthUser;
pub use path::{ApiPath, MessagePath, SubscriberPath, TopicPath};
pub use sync::{ReactionQuery, ReactionQueryParams};
pub use validated::ValidatedJson;
