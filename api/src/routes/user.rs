use crate::{
    AppState, auth::resolve_identity, dto::MeResponse, errors::ApiError, feed::post_author,
};
use axum::{Json, extract::State, http::HeaderMap};

/// GET /users/me
/// Headers: Authorization: Bearer <token> (optional; guests get a guest greeting)
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;

    Ok(Json(MeResponse {
        id: identity.as_ref().map(|identity| identity.user_id),
        display_name: identity.as_ref().and_then(|identity| identity.display_name.clone()),
        greeting: post_author(identity.as_ref()),
    }))
}
