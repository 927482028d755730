//! Token lifecycle manager — issuance, access verification, and refresh
//! rotation.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use opshub_cache::CacheManager;
use opshub_core::config::auth::AuthConfig;
use opshub_core::error::AppError;

use crate::jwt::encoder::TokenPair;
use crate::jwt::{Claims, JwtDecoder, JwtEncoder};

use super::store::RefreshTokenStore;

/// Manages the access/refresh token lifecycle against the revocation
/// store.
#[derive(Debug, Clone)]
pub struct TokenManager {
    /// Token signer.
    encoder: JwtEncoder,
    /// Token validator.
    decoder: JwtDecoder,
    /// Live refresh token tracking.
    store: RefreshTokenStore,
}

impl TokenManager {
    /// Creates a new token manager from auth configuration.
    ///
    /// Fails on an unsupported signing algorithm; this is a startup-phase
    /// configuration error.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Result<Self, AppError> {
        let encoder = JwtEncoder::new(config)?;
        let decoder = JwtDecoder::new(config)?;
        let store = RefreshTokenStore::new(
            cache,
            Duration::from_secs(config.refresh_ttl_minutes * 60),
        );

        Ok(Self {
            encoder,
            decoder,
            store,
        })
    }

    /// Mints an access + refresh pair for a subject and registers the
    /// refresh token as live. Called on successful login.
    pub async fn issue_pair(&self, public_id: &str) -> Result<TokenPair, AppError> {
        let (pair, refresh_jti) = self.encoder.generate_token_pair(public_id)?;
        self.store.add(&refresh_jti, public_id).await?;

        info!(subject = %public_id, "Issued token pair");
        Ok(pair)
    }

    /// Rotates a refresh token: verifies it, consumes its revocation-store
    /// entry, and mints a replacement pair.
    ///
    /// Consuming the old `jti` is one atomic read-and-delete, so a replayed
    /// refresh token — including one presented concurrently with the
    /// winning rotation — fails here.
    pub async fn refresh(&self, presented: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(presented)?;

        let subject = self
            .store
            .consume(&claims.jti)
            .await?
            .ok_or_else(|| AppError::unauthorized("Token has been revoked"))?;

        let (pair, new_jti) = self.encoder.generate_token_pair(&subject)?;
        self.store.add(&new_jti, &subject).await?;

        info!(subject = %subject, "Refresh token rotated");
        Ok(pair)
    }

    /// Verifies an access token for a protected route and returns its
    /// claims. The caller resolves the subject to an internal user id.
    pub fn verify_access(&self, token: &str) -> Result<Claims, AppError> {
        self.decoder.decode_access_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opshub_cache::memory::MemoryCacheProvider;
    use opshub_core::error::ErrorKind;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_algorithm: "HS256".to_string(),
            jwt_secret: "test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_minutes: 60,
            bcrypt_cost: 4,
            password_cooldown_seconds: 86400,
            max_servers_per_user: 10,
            login_delay_max_ms: 0,
        }
    }

    fn manager() -> TokenManager {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::for_tests(),
        )));
        TokenManager::new(&test_config(), cache).unwrap()
    }

    #[tokio::test]
    async fn test_issue_and_verify_access() {
        let mgr = manager();
        let pair = mgr.issue_pair("u1AbCdEfGhIjKlMnOp").await.unwrap();

        let claims = mgr.verify_access(&pair.access_token).unwrap();
        assert_eq!(claims.sub, "u1AbCdEfGhIjKlMnOp");
    }

    #[tokio::test]
    async fn test_refresh_token_is_not_an_access_token() {
        let mgr = manager();
        let pair = mgr.issue_pair("subject1234567890x").await.unwrap();

        let err = mgr.verify_access(&pair.refresh_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_access_token_cannot_refresh() {
        let mgr = manager();
        let pair = mgr.issue_pair("subject1234567890x").await.unwrap();

        let err = mgr.refresh(&pair.access_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_rotation_is_single_use() {
        let mgr = manager();
        let pair_a = mgr.issue_pair("subject1234567890x").await.unwrap();

        // First rotation succeeds and yields a new pair.
        let pair_b = mgr.refresh(&pair_a.refresh_token).await.unwrap();
        assert_ne!(pair_a.refresh_token, pair_b.refresh_token);

        // Replaying the consumed token fails.
        let err = mgr.refresh(&pair_a.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(err.message.contains("revoked"));

        // The replacement is still live.
        assert!(mgr.refresh(&pair_b.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let mgr = manager();
        let err = mgr.refresh("not-a-jwt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_foreign_signature_is_rejected() {
        let mgr = manager();

        let mut other_config = test_config();
        other_config.jwt_secret = "different-secret".to_string();
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::for_tests(),
        )));
        let other = TokenManager::new(&other_config, cache).unwrap();

        let pair = other.issue_pair("subject1234567890x").await.unwrap();
        let err = mgr.verify_access(&pair.access_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
