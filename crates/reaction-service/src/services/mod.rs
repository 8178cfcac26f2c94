//! Business logic services
//!
//! Services borrow a [`ServiceContext`], check topic existence, and run
//! every storage call under the configured deadline.

pub mod context;
pub mod error;
pub mod locks;
pub mod reaction;
pub mod topic;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use locks::TopicWriteLocks;
pub use reaction::ReactionService;
pub use topic::TopicService;
