//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Put (or replace) the caller's reaction on a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactRequest {
    /// Opaque reaction token, typically an emoji
    #[validate(length(min = 1, max = 64, message = "Content must be 1-64 characters"))]
    pub content: String,
}

/// Create topic request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTopicRequest {
    #[validate(length(min = 1, max = 64, message = "Topic name must be 1-64 characters"))]
    pub name: String,
}
