use crate::feed::FeedError;
use crate::profile::ProfileError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    Unauthenticated,
    Forbidden,
    NotFound,
    RateLimited,
    ValidationError(String),
    /// Content refused by moderation; the message is shown to the author.
    Rejected(String),
    Upstream(String),
    InternalError(String),
}

/// Convert our custom errors to HTTP responses
///
/// `IntoResponse` trait: Axum calls this to convert errors to responses
/// This is how we control what users see when errors occur
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ProfileError::Unauthenticated.to_string(),
            ),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, FeedError::Forbidden.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests".to_string(),
            ),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::Rejected(_) => ApiError::Rejected(err.to_string()),
            FeedError::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::MissingFields | ProfileError::Invalid(_) => {
                ApiError::ValidationError(err.to_string())
            }
            ProfileError::Unauthenticated => ApiError::Unauthenticated,
            ProfileError::Fetch(ref source)
            | ProfileError::Upload(ref source)
            | ProfileError::Persist(ref source)
            | ProfileError::Delete(ref source) => {
                error!("Profile store failure: {}", source);
                ApiError::Upstream(err.to_string())
            }
        }
    }
}
