//! User handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use reaction_core::SubsQuery;
use reaction_service::dto::SubscriptionResponse;
use reaction_service::TopicService;

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// List the caller's topics with their reaction high-water marks
///
/// GET /users/@me/topics?topic=&limit=
pub async fn get_current_user_topics(
    State(state): State<AppState>,
    auth: AuthUser,
    query: Result<Query<SubsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SubscriptionResponse>>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = TopicService::new(state.service_context());
    let topics = service.topics_for_user(auth.user_id, query).await?;
    Ok(Json(topics))
}
