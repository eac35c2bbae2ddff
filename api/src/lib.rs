//! Trill: a small social-posting service.
//!
//! - Banned-word moderation of new posts
//! - In-memory feed with likes, reposts, replies and reply drafts
//! - Bearer-token identity (tokens come from an external provider)
//! - Profile documents with a photo upload pipeline
//! - Rate limiting, CORS and structured logging

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod feed;
pub mod models;
pub mod moderation;
pub mod profile;
pub mod routes;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the router with all routes and middleware.
pub fn app(state: AppState, max_concurrent_requests: usize) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/users/me", get(routes::get_current_user))
        // Feed
        .route("/posts", post(routes::create_post).get(routes::get_posts))
        .route(
            "/posts/{id}",
            get(routes::get_post).delete(routes::delete_post),
        )
        .route("/posts/{id}/like", post(routes::toggle_like))
        .route("/posts/{id}/repost", post(routes::toggle_repost))
        .route("/posts/{id}/reply-draft", put(routes::set_reply_draft))
        .route("/posts/{id}/replies", post(routes::add_reply))
        // Profile
        .route(
            "/profile",
            get(routes::get_profile)
                .put(routes::save_profile)
                .delete(routes::delete_profile),
        )
        .route("/profile/photo", put(routes::upload_photo))
        // Add state and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
}
