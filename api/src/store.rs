//! Storage seams for profile data: a document store and a blob store, with
//! in-memory implementations backed by `DashMap`.

use crate::models::{ProfileDocument, ProfilePatch};
use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("object not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Document store holding one profile per user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_id: Uuid) -> StoreResult<Option<ProfileDocument>>;

    /// Merge `patch` into the stored document, creating it when absent.
    async fn merge(&self, user_id: Uuid, patch: ProfilePatch) -> StoreResult<ProfileDocument>;

    /// Returns whether a document existed.
    async fn delete(&self, user_id: Uuid) -> StoreResult<bool>;
}

/// Object store for uploaded files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key` and return its download URL.
    async fn put(&self, key: &str, data: Vec<u8>) -> StoreResult<String>;

    async fn delete(&self, key: &str) -> StoreResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    docs: DashMap<Uuid, ProfileDocument>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, user_id: Uuid) -> StoreResult<Option<ProfileDocument>> {
        Ok(self.docs.get(&user_id).map(|doc| doc.value().clone()))
    }

    async fn merge(&self, user_id: Uuid, patch: ProfilePatch) -> StoreResult<ProfileDocument> {
        let mut doc = self.docs.entry(user_id).or_default();
        patch.apply(doc.value_mut());
        Ok(doc.value().clone())
    }

    async fn delete(&self, user_id: Uuid) -> StoreResult<bool> {
        Ok(self.docs.remove(&user_id).is_some())
    }
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>) -> StoreResult<String> {
        self.objects.insert(key.to_string(), data);
        Ok(format!("memory://{}", key))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.objects
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}
