//! # reaction-db
//!
//! Storage layer implementing the reaction-core repository traits.
//!
//! - [`repositories`]: PostgreSQL via SQLx. Each reaction write is one
//!   atomic statement; reads aggregate in a single grouped query.
//! - [`memory`]: a `dashmap` backend with identical behaviour, used by
//!   tests and `STORAGE_BACKEND=memory`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reaction_db::{create_pool, run_migrations, PgReactionRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/reactions")).await?;
//!     run_migrations(&pool).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgReactionRepository, PgSubscriptionRepository, PgTopicRepository};
