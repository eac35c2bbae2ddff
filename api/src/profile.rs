//! Profile editing over the document and blob stores.

use crate::auth::Identity;
use crate::models::{ProfileDocument, ProfilePatch, ProfileUpdate};
use crate::store::{BlobStore, ProfileStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Please fill out all required fields.")]
    MissingFields,

    #[error("{0}")]
    Invalid(String),

    #[error("User not authenticated. Please log in again.")]
    Unauthenticated,

    #[error("Error fetching user data.")]
    Fetch(#[source] StoreError),

    /// The photo could not be stored; the document was not touched.
    #[error("Error uploading file.")]
    Upload(#[source] StoreError),

    /// The photo or profile fields could not be written to the document.
    #[error("Error saving user data. Please try again.")]
    Persist(#[source] StoreError),

    #[error("Error deleting profile.")]
    Delete(#[source] StoreError),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

/// Object key of a user's profile photo.
pub fn photo_key(user_id: &Uuid) -> String {
    format!("profile-pictures/{}", user_id)
}

#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { profiles, blobs }
    }

    /// The caller's document, or an empty one for guests and new users.
    pub async fn load(&self, identity: Option<&Identity>) -> Result<ProfileDocument> {
        let Some(identity) = identity else {
            return Ok(ProfileDocument::default());
        };

        let doc = self
            .profiles
            .get(identity.user_id)
            .await
            .map_err(ProfileError::Fetch)?;

        Ok(doc.unwrap_or_default())
    }

    /// Validate and merge the edited fields into the caller's document.
    pub async fn save(
        &self,
        identity: Option<&Identity>,
        update: ProfileUpdate,
    ) -> Result<ProfileDocument> {
        if update.missing_required() {
            return Err(ProfileError::MissingFields);
        }
        update
            .validate()
            .map_err(|e| ProfileError::Invalid(e.to_string()))?;

        let identity = identity.ok_or(ProfileError::Unauthenticated)?;

        let doc = self
            .profiles
            .merge(identity.user_id, update.into())
            .await
            .map_err(ProfileError::Persist)?;

        info!("Profile saved for user {}", identity.user_id);

        Ok(doc)
    }

    /// Upload a new photo, then record its URL on the document.
    ///
    /// The second stage only runs once the upload has completed; each stage
    /// reports its own error. An empty upload changes nothing.
    pub async fn upload_photo(
        &self,
        identity: Option<&Identity>,
        data: Vec<u8>,
    ) -> Result<ProfileDocument> {
        let identity = identity.ok_or(ProfileError::Unauthenticated)?;
        if data.is_empty() {
            return self.load(Some(identity)).await;
        }

        let url = self
            .blobs
            .put(&photo_key(&identity.user_id), data)
            .await
            .map_err(ProfileError::Upload)?;

        let doc = self
            .profiles
            .merge(identity.user_id, ProfilePatch::image(url))
            .await
            .map_err(ProfileError::Persist)?;

        info!("Profile photo updated for user {}", identity.user_id);

        Ok(doc)
    }

    /// Remove the caller's document and photo.
    pub async fn delete(&self, identity: Option<&Identity>) -> Result<()> {
        let identity = identity.ok_or(ProfileError::Unauthenticated)?;

        self.profiles
            .delete(identity.user_id)
            .await
            .map_err(ProfileError::Delete)?;

        match self.blobs.delete(&photo_key(&identity.user_id)).await {
            Ok(()) => {}
            // Users without a photo have nothing to remove.
            Err(StoreError::NotFound(key)) => warn!("No profile photo at {}", key),
            Err(e) => return Err(ProfileError::Delete(e)),
        }

        info!("Profile deleted for user {}", identity.user_id);

        Ok(())
    }
}
