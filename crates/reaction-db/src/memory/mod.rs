//! In-memory storage backend
//!
//! A complete implementation of the repository traits over `dashmap`, for
//! tests and single-node deployments.

mod store;

pub use store::MemoryStore;
