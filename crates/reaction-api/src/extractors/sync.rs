//! Reaction sync window extractor
//!
//! Reads `since`, `before`, `limit` and `view` from the query string. The
//! bounds are passed through untouched so the store can reject unbounded
//! queries; `limit` is clamped to the configured maximum.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Query},
    http::request::Parts,
};
use reaction_common::SyncConfig;
use reaction_core::{QueryOpt, ReactionView, Revision};
use serde::Deserialize;

use crate::response::ApiError;
use crate::state::AppState;

/// Raw reaction query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ReactionQueryParams {
    /// Inclusive lower revision bound
    #[serde(default)]
    pub since: Option<i64>,
    /// Exclusive upper revision bound
    #[serde(default)]
    pub before: Option<i64>,
    #[serde(default)]
    pub limit: Option<u32>,
    /// `listing` (default) or `channel`
    #[serde(default)]
    pub view: Option<ReactionView>,
}

/// Resolved reaction query
#[derive(Debug, Clone, Copy)]
pub struct ReactionQuery {
    pub opts: QueryOpt,
    pub view: ReactionView,
}

impl ReactionQuery {
    /// Apply the sync limits to raw parameters
    pub fn resolve(params: ReactionQueryParams, sync: SyncConfig) -> Self {
        Self {
            opts: QueryOpt {
                since: params.since.map(Revision::new),
                before: params.before.map(Revision::new),
                limit: sync.clamp(params.limit),
            },
            view: params.view.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ReactionQuery
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ReactionQueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        let app_state = AppState::from_ref(state);
        Ok(Self::resolve(params, app_state.sync_config()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sync(default_limit: u32, max_limit: u32) -> SyncConfig {
        SyncConfig {
            default_limit,
            max_limit,
        }
    }

    #[test]
    fn test_bounds_pass_through() {
        let params = ReactionQueryParams {
            since: Some(3),
            before: Some(9),
            ..Default::default()
        };
        let query = ReactionQuery::resolve(params, sync(0, 1000));
        assert_eq!(query.opts.since, Some(Revision::new(3)));
        assert_eq!(query.opts.before, Some(Revision::new(9)));
        assert_eq!(query.opts.limit, None);
        assert_eq!(query.view, ReactionView::Listing);
    }

    #[test]
    fn test_unbounded_query_is_left_for_the_store() {
        let query = ReactionQuery::resolve(ReactionQueryParams::default(), sync(0, 1000));
        assert!(!query.opts.is_bounded());
    }

    #[test]
    fn test_limit_is_clamped() {
        let params = ReactionQueryParams {
            since: Some(1),
            limit: Some(5000),
            view: Some(ReactionView::Channel),
            ..Default::default()
        };
        let query = ReactionQuery::resolve(params, sync(50, 1000));
        assert_eq!(query.opts.limit, Some(1000));
        assert_eq!(query.view, ReactionView::Channel);

        let params = ReactionQueryParams {
            since: Some(1),
            ..Default::default()
        };
        assert_eq!(ReactionQuery::resolve(params, sync(50, 1000)).opts.limit, Some(50));
    }
}
