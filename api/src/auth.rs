use crate::errors::ApiError;
use axum::http::{HeaderMap, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label used when a signed-in user has no display name.
pub const UNNAMED_USER: &str = "User hasn't set a name yet";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exp: usize,
}

/// The signed-in caller as seen by the feed and profile code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: Uuid, display_name: Option<&str>) -> Self {
        Self {
            user_id,
            display_name: display_name.map(str::to_string),
        }
    }

    /// The display name, treating an empty one as unset.
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Name stamped on posts and compared on deletion.
    pub fn author_name(&self) -> String {
        self.name().unwrap_or(UNNAMED_USER).to_string()
    }
}

/// Tokens are minted by the identity provider; this is the same encoding,
/// used by local tooling and tests.
pub fn create_token(
    user_id: &Uuid,
    display_name: Option<&str>,
    secret: &str,
) -> Result<String, ApiError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| ApiError::InternalError("Failed to calculate expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        name: display_name.map(str::to_string),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalError(format!("Token Creation failed: {}", e)))
}

pub fn validate_token(headers: &HeaderMap, secret: &str) -> Result<Claims, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    // Check for "Bearer " prefix
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Unauthorized)
}

/// Resolve the caller of a request.
///
/// No `Authorization` header means a guest (`None`). A header that is present
/// but does not carry a valid token is rejected.
pub fn resolve_identity(headers: &HeaderMap, secret: &str) -> Result<Option<Identity>, ApiError> {
    if !headers.contains_key(header::AUTHORIZATION) {
        return Ok(None);
    }

    let claims = validate_token(headers, secret)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized)?;

    Ok(Some(Identity {
        user_id,
        display_name: claims.name,
    }))
}
