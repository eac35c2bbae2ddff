use crate::{
    config::Config,
    feed::{Feed, SharedFeed},
    profile::ProfileService,
    store::{MemoryBlobStore, MemoryProfileStore},
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::Arc;

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// `feed` is the single handle through which every feed command runs; the
/// mutex is held only for the duration of one command.
#[derive(Clone)]
pub struct AppState {
    pub feed: SharedFeed,
    pub profiles: ProfileService,
    pub write_limiter: Arc<DefaultDirectRateLimiter>,
    pub jwt_secret: String,
}

impl AppState {
    /// State backed by in-memory profile and photo stores.
    pub fn new(config: &Config) -> Self {
        let profiles = ProfileService::new(
            Arc::new(MemoryProfileStore::new()),
            Arc::new(MemoryBlobStore::new()),
        );
        Self::with_profiles(config, profiles)
    }

    pub fn with_profiles(config: &Config, profiles: ProfileService) -> Self {
        Self {
            feed: Feed::shared(),
            profiles,
            write_limiter: Arc::new(RateLimiter::direct(Quota::per_second(
                config.posts_per_second,
            ))),
            jwt_secret: config.jwt_secret.clone(),
        }
    }
}
