//! Authentication extractor
//!
//! Extracts and validates the bearer token identifying the caller.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use reaction_core::UserId;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the JWT
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

impl AuthUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let user_id = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected caller token");
                ApiError::App(e)
            })?;

        Ok(AuthUser::new(user_id))
    }
}
