//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload embedded in every token.
///
/// The subject is always the user's *public* identifier; internal ids
/// never appear in tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user's public identifier.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token identifier. For refresh tokens this is the revocation-store
    /// key.
    pub jti: Uuid,
    /// Token class: access or refresh.
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Longer-lived refresh token for obtaining new token pairs.
    Refresh,
}

impl Claims {
    /// Returns the public user id from the subject claim.
    pub fn subject(&self) -> &str {
        &self.sub
    }
}
