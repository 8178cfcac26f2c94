//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use reaction_core::{DomainError, UserId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Path extractor whose rejections render as API errors
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

/// `/topics/:topic`
#[derive(Debug, Deserialize)]
pub struct TopicPath {
    pub topic: String,
}

/// `/topics/:topic/messages/:seq`
#[derive(Debug, Deserialize)]
pub struct MessagePath {
    pub topic: String,
    pub seq: i32,
}

/// `/topics/:topic/subscribers/:user_id`
#[derive(Debug, Deserialize)]
pub struct SubscriberPath {
    pub topic: String,
    pub user_id: String,
}

impl SubscriberPath {
    /// Parse the external `usr…` id
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        UserId::parse_prefixed(&self.user_id)
            .map_err(|e| DomainError::InvalidUserId(format!("{}: {e}", self.user_id)).into())
    }
}
