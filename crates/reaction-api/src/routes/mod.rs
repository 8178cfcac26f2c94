//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, reactions, topics, users};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(topic_routes())
        .merge(reaction_routes())
        .merge(user_routes())
}

/// Topic routes
fn topic_routes() -> Router<AppState> {
    Router::new()
        .route("/topics", post(topics::create_topic))
        .route("/topics/:topic", get(topics::get_topic))
        .route(
            "/topics/:topic/subscribers/:user_id",
            put(topics::share_topic),
        )
}

/// Reaction routes
fn reaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/topics/:topic/messages/:seq/reactions",
            put(reactions::react).delete(reactions::unreact),
        )
        .route("/topics/:topic/reactions", get(reactions::list_reactions))
        .route(
            "/topics/:topic/reactions/high-water",
            get(reactions::high_water),
        )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/@me/topics", get(users::get_current_user_topics))
}
