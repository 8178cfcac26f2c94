//! Revision window - the validated sync cursor
//!
//! A client that has seen group revision `r` asks for `since = r + 1` to get
//! only groups that changed afterwards. With a limit, groups come newest
//! first so paging always makes progress from the latest change backwards.

use crate::error::DomainError;
use crate::value_objects::Revision;

use super::QueryOpt;

/// Bounds applied to group revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionWindow {
    since: Option<Revision>,
    before: Option<Revision>,
    limit: Option<usize>,
}

impl RevisionWindow {
    /// Validate caller options
    ///
    /// Absent options, or options with neither bound, are rejected so the
    /// engine never runs an unbounded scan.
    pub fn from_opts(opts: Option<&QueryOpt>) -> Result<Self, DomainError> {
        let opts = opts.ok_or_else(|| DomainError::invalid_query("query options are required"))?;

        if !opts.is_bounded() {
            return Err(DomainError::invalid_query(
                "either 'since' or 'before' must be set",
            ));
        }
        if opts.since.is_some_and(|s| s.is_negative()) {
            return Err(DomainError::invalid_query("'since' must not be negative"));
        }
        if opts.before.is_some_and(|b| b.is_negative()) {
            return Err(DomainError::invalid_query("'before' must not be negative"));
        }
        if opts.limit == Some(0) {
            return Err(DomainError::invalid_query("'limit' must be positive"));
        }

        Ok(Self {
            since: opts.since,
            before: opts.before,
            limit: opts.limit.map(|l| l as usize),
        })
    }

    pub fn since(&self) -> Option<Revision> {
        self.since
    }

    pub fn before(&self) -> Option<Revision> {
        self.before
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// `since <= revision < before`, for whichever bounds are set
    pub fn contains(&self, revision: Revision) -> bool {
        self.since.map_or(true, |s| revision >= s) && self.before.map_or(true, |b| revision < b)
    }

    /// Whether no revision can satisfy both bounds
    pub fn is_empty(&self) -> bool {
        matches!((self.since, self.before), (Some(s), Some(b)) if s >= b)
    }
}
