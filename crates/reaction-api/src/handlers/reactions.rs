//! Reaction handlers
//!
//! Endpoints for putting, removing and syncing message reactions.

use axum::{extract::State, Json};
use reaction_service::dto::{
    HighWaterResponse, ReactRequest, ReactionListResponse, ReactionResponse,
};
use reaction_service::ReactionService;

use crate::extractors::{ApiPath, AuthUser, MessagePath, ReactionQuery, TopicPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Put the caller's reaction on a message
///
/// PUT /topics/{topic}/messages/{seq}/reactions
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<MessagePath>,
    ValidatedJson(body): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let service = ReactionService::new(state.service_context());
    let reaction = service
        .react(&path.topic, path.seq, auth.user_id, body.content)
        .await?;
    Ok(Json(reaction))
}

/// Remove the caller's reaction from a message
///
/// DELETE /topics/{topic}/messages/{seq}/reactions
pub async fn unreact(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<MessagePath>,
) -> ApiResult<NoContent> {
    let service = ReactionService::new(state.service_context());
    service.unreact(&path.topic, path.seq, auth.user_id).await?;
    Ok(NoContent)
}

/// Aggregated reactions changed inside a revision window
///
/// GET /topics/{topic}/reactions?since=&before=&limit=&view=
pub async fn list_reactions(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<TopicPath>,
    query: ReactionQuery,
) -> ApiResult<Json<ReactionListResponse>> {
    let service = ReactionService::new(state.service_context());
    let reactions = service
        .list(&path.topic, auth.user_id, query.view, Some(query.opts))
        .await?;
    Ok(Json(reactions))
}

/// Highest reaction revision in a topic
///
/// GET /topics/{topic}/reactions/high-water
pub async fn high_water(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<TopicPath>,
) -> ApiResult<Json<HighWaterResponse>> {
    let service = ReactionService::new(state.service_context());
    let high_water = service.max_revision(&path.topic).await?;
    Ok(Json(high_water))
}
