use crate::{
    AppState,
    auth::resolve_identity,
    errors::ApiError,
    models::{ProfileDocument, ProfileUpdate},
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};

/// GET /profile
/// Headers: Authorization: Bearer <token> (optional; guests get an empty document)
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileDocument>, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;
    let doc = state.profiles.load(identity.as_ref()).await?;

    Ok(Json(doc))
}

/// PUT /profile
/// Headers: Authorization: Bearer <token>
/// Body: { "name": "...", "phone": "...", "location": "...", "birthday": "YYYY-MM-DD", "age": 30 }
pub async fn save_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<ProfileDocument>, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;
    let doc = state.profiles.save(identity.as_ref(), payload).await?;

    Ok(Json(doc))
}

/// PUT /profile/photo
/// Headers: Authorization: Bearer <token>
/// Body: raw image bytes
pub async fn upload_photo(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProfileDocument>, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;
    let doc = state
        .profiles
        .upload_photo(identity.as_ref(), body.to_vec())
        .await?;

    Ok(Json(doc))
}

/// DELETE /profile
/// Headers: Authorization: Bearer <token>
pub async fn delete_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let identity = resolve_identity(&headers, &state.jwt_secret)?;
    state.profiles.delete(identity.as_ref()).await?;

    Ok(StatusCode::NO_CONTENT)
}
