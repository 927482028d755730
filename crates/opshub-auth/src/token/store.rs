//! Refresh token revocation store.
//!
//! Every live refresh token has a `refreshtoken:<jti>` key in the
//! key-value store holding the token's subject, with a TTL equal to the
//! refresh lifetime. Presence means the token is valid; absence means it
//! was rotated, revoked, or expired. The store's per-key TTL bounds the
//! token's absolute lifetime independently of application logic.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use opshub_cache::CacheManager;
use opshub_cache::keys;
use opshub_core::result::AppResult;
use opshub_core::traits::cache::CacheProvider;

/// Tracks which refresh tokens are still live.
#[derive(Debug, Clone)]
pub struct RefreshTokenStore {
    /// Backing key-value store.
    cache: Arc<CacheManager>,
    /// Refresh token lifetime.
    ttl: Duration,
}

impl RefreshTokenStore {
    /// Creates a new store with the given refresh lifetime.
    pub fn new(cache: Arc<CacheManager>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Registers a freshly issued refresh token as live.
    pub async fn add(&self, jti: &Uuid, subject: &str) -> AppResult<()> {
        self.cache
            .set(&keys::refresh_token(jti), subject, self.ttl)
            .await
    }

    /// Atomically consumes a refresh token, returning its subject if it
    /// was still live.
    ///
    /// The single get-and-delete is what makes rotation single-use: of
    /// two concurrent rotations of the same token, exactly one observes
    /// the subject and the other sees `None`.
    pub async fn consume(&self, jti: &Uuid) -> AppResult<Option<String>> {
        self.cache.get_del(&keys::refresh_token(jti)).await
    }
}
