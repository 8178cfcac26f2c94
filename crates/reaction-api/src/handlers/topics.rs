//! Topic handlers

use axum::{extract::State, Json};
use reaction_service::dto::{CreateTopicRequest, SubscriptionResponse, TopicResponse};
use reaction_service::TopicService;

use crate::extractors::{ApiPath, AuthUser, SubscriberPath, TopicPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a topic owned by the caller
///
/// POST /topics
pub async fn create_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateTopicRequest>,
) -> ApiResult<Created<Json<TopicResponse>>> {
    let service = TopicService::new(state.service_context());
    let topic = service.create(auth.user_id, body.name).await?;
    Ok(Created(Json(topic)))
}

/// GET /topics/{topic}
pub async fn get_topic(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<TopicPath>,
) -> ApiResult<Json<TopicResponse>> {
    let service = TopicService::new(state.service_context());
    let topic = service.get(&path.topic).await?;
    Ok(Json(topic))
}

/// Share a topic with another user
///
/// PUT /topics/{topic}/subscribers/{user_id}
pub async fn share_topic(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<SubscriberPath>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let user_id = path.user_id()?;

    let service = TopicService::new(state.service_context());
    let subscription = service.share(&path.topic, user_id).await?;
    Ok(Json(subscription))
}
