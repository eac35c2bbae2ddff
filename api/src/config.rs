use std::num::NonZeroU32;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_POSTS_PER_SECOND: u32 = 5;
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub bind_addr: String,
    /// Sustained rate of feed writes (posts and replies) across all callers.
    pub posts_per_second: NonZeroU32,
    pub max_concurrent_requests: usize,
}

impl Config {
    /// Load from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let posts_per_second = match lookup("POSTS_PER_SECOND") {
            Some(value) => value
                .parse::<NonZeroU32>()
                .map_err(|_| ConfigError::Invalid {
                    key: "POSTS_PER_SECOND",
                    value,
                })?,
            None => NonZeroU32::new(DEFAULT_POSTS_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        };

        let max_concurrent_requests = match lookup("MAX_CONCURRENT_REQUESTS") {
            Some(value) => match value.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "MAX_CONCURRENT_REQUESTS",
                        value,
                    });
                }
            },
            None => DEFAULT_MAX_CONCURRENT_REQUESTS,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            posts_per_second,
            max_concurrent_requests,
        })
    }
}
