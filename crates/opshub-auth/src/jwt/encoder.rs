//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use opshub_core::config::auth::AuthConfig;
use opshub_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Signing algorithm.
    algorithm: Algorithm,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in minutes.
    refresh_ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.algorithm)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_minutes", &self.refresh_ttl_minutes)
            .finish()
    }
}

/// A freshly minted access + refresh token pair.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: chrono::DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: chrono::DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    ///
    /// Fails when the configured algorithm is not an HMAC variant; this is
    /// a startup-phase configuration error.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = parse_hmac_algorithm(&config.jwt_algorithm)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            algorithm,
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_minutes: config.refresh_ttl_minutes as i64,
        })
    }

    /// The configured signing algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Generates a new access + refresh token pair for the given subject.
    ///
    /// Returns the pair together with the refresh token's `jti`, which the
    /// caller persists in the revocation store.
    pub fn generate_token_pair(&self, public_id: &str) -> Result<(TokenPair, Uuid), AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::minutes(self.refresh_ttl_minutes);

        let access_claims = Claims {
            sub: public_id.to_string(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };

        let refresh_jti = Uuid::new_v4();
        let refresh_claims = Claims {
            sub: public_id.to_string(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            jti: refresh_jti,
            token_type: TokenType::Refresh,
        };

        let header = Header::new(self.algorithm);

        let access_token = encode(&header, &access_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&header, &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok((
            TokenPair {
                access_token,
                refresh_token,
                access_expires_at: access_exp,
                refresh_expires_at: refresh_exp,
            },
            refresh_jti,
        ))
    }
}

/// Parse an HMAC algorithm name from configuration.
pub(crate) fn parse_hmac_algorithm(name: &str) -> Result<Algorithm, AppError> {
    match name {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported JWT algorithm '{other}'. Supported: HS256, HS384, HS512"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_hmac_algorithm() {
        assert!(parse_hmac_algorithm("RS256").is_err());
        assert!(parse_hmac_algorithm("HS384").is_ok());
    }
}
