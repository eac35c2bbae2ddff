use crate::{
    AppState,
    auth::resolve_identity,
    dto::{
        CreatePostRequest, PaginatedResponse, PaginationParams, ReplyDraftRequest, ReplyRequest,
    },
    errors::ApiError,
    models::Post,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

fn post_or_no_content(post: Option<Post>) -> Response {
    match post {
        Some(post) => Json(post).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// POST /posts
/// Headers: Authorization: Bearer <token> (optional)
/// Body: { "text": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Response, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;

    // Blank posts are ignored before they spend a write token.
    if payload.text.trim().is_empty() {
        debug!("Ignoring blank post");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    state
        .write_limiter
        .check()
        .map_err(|_| ApiError::RateLimited)?;

    let post = state
        .feed
        .lock()
        .create_post(&payload.text, identity.as_ref())?
        .cloned();

    match post {
        Some(post) => {
            info!("Post created: {} by {}", post.id, post.author);
            Ok((StatusCode::CREATED, Json(post)).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// GET /posts?page=1&limit=10
/// Posts come back in the order they were created.
pub async fn get_posts(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Json<PaginatedResponse<Post>> {
    let feed = state.feed.lock();
    let posts = feed.posts();

    let total = posts.len();
    let start = (params.page.saturating_sub(1)).saturating_mul(params.limit);
    let end = start.saturating_add(params.limit).min(total);

    let paginated_posts = if start < total {
        posts[start..end].to_vec()
    } else {
        vec![]
    };

    Json(PaginatedResponse {
        data: paginated_posts,
        page: params.page,
        limit: params.limit,
        total,
    })
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Post>, ApiError> {
    let post = state.feed.lock().get(id).cloned().ok_or(ApiError::NotFound)?;

    Ok(Json(post))
}

/// DELETE /posts/:id
/// Headers: Authorization: Bearer <token>
/// Only a caller whose display name matches the post author may delete it.
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;
    let requester = identity
        .map(|identity| identity.author_name())
        .unwrap_or_default();

    if state.feed.lock().delete_post(id, &requester)? {
        info!("Post deleted: {} by {}", id, requester);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/:id/like
pub async fn toggle_like(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let post = state.feed.lock().toggle_like(id).cloned();
    match &post {
        Some(post) => debug!("Like toggled on post {}: {}", id, post.liked),
        None => debug!("Like of unknown post {} ignored", id),
    }
    post_or_no_content(post)
}

/// POST /posts/:id/repost
pub async fn toggle_repost(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let post = state.feed.lock().toggle_repost(id).cloned();
    match &post {
        Some(post) => debug!("Repost toggled on post {}: {}", id, post.reposted),
        None => debug!("Repost of unknown post {} ignored", id),
    }
    post_or_no_content(post)
}

/// PUT /posts/:id/reply-draft
/// Body: { "text": "..." }
pub async fn set_reply_draft(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ReplyDraftRequest>,
) -> Result<StatusCode, ApiError> {
    if !state.feed.lock().set_reply_draft(id, &payload.text) {
        debug!("Draft for unknown post {} ignored", id);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/:id/replies
/// Headers: Authorization: Bearer <token> (optional)
/// Body: { "text": "..." } or {} to send the stored draft
pub async fn add_reply(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(payload): Json<ReplyRequest>,
) -> Result<Response, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;
    state
        .write_limiter
        .check()
        .map_err(|_| ApiError::RateLimited)?;

    let post = {
        let mut feed = state.feed.lock();
        if let Some(text) = &payload.text {
            feed.set_reply_draft(id, text);
        }
        feed.submit_reply(id, identity.as_ref()).cloned()
    };

    match post {
        Some(post) => {
            info!("Reply added to post {}", post.id);
            Ok((StatusCode::CREATED, Json(post)).into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
