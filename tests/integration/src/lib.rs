//! Integration test utilities for the reaction store
//!
//! Spawns the HTTP server on the in-memory backend and drives it over
//! real sockets.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
