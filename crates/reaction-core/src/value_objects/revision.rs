//! Revision numbers and revision sources
//!
//! A revision is a caller-assigned, intended-monotonic integer stamped on every
//! reaction write. The store persists whatever revision it is given; producing
//! monotonic values is the job of a [`RevisionSource`] owned by the write
//! coordination layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Reaction revision (non-negative 64-bit integer)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(i64);

impl Revision {
    /// Absent revision, reported for topics without reactions
    pub const ZERO: Revision = Revision(0);

    /// Create a new Revision from a raw i64 value
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The cursor a client sends after having seen `self`
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Revision {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Revision> for i64 {
    fn from(rev: Revision) -> Self {
        rev.0
    }
}

/// Supplier of revision numbers for reaction writes
///
/// Implementations must hand out strictly increasing values across all
/// callers sharing the source.
pub trait RevisionSource: Send + Sync {
    /// Reserve the next revision
    fn next_revision(&self) -> Revision;

    /// Highest revision handed out so far
    fn current(&self) -> Revision;

    /// Account for a revision assigned elsewhere, so later values exceed it
    fn observe(&self, _seen: Revision) {}
}

/// Lock-free in-process revision counter
///
/// Seed it with the store's latest revision at startup so values keep
/// increasing across restarts.
#[derive(Debug, Default)]
pub struct AtomicRevisionSource {
    last: AtomicI64,
}

impl AtomicRevisionSource {
    /// Create a source whose first revision is 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source whose first revision is `seed + 1`
    pub fn starting_after(seed: Revision) -> Self {
        Self {
            last: AtomicI64::new(seed.into_inner().max(0)),
        }
    }
}

impl RevisionSource for AtomicRevisionSource {
    fn next_revision(&self) -> Revision {
        Revision(self.last.fetch_add(1, Ordering::AcqRel) + 1)
    }

    fn current(&self) -> Revision {
        Revision(self.last.load(Ordering::Acquire))
    }

    fn observe(&self, seen: Revision) {
        self.last.fetch_max(seen.into_inner(), Ordering::AcqRel);
    }
}
