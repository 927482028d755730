//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use opshub_core::config::auth::AuthConfig;
use opshub_core::error::AppError;

use super::claims::{Claims, TokenType};
use super::encoder::parse_hmac_algorithm;

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let algorithm = parse_hmac_algorithm(&config.jwt_algorithm)?;
        Ok(Self::with_algorithm(&config.jwt_secret, algorithm))
    }

    /// Creates a decoder for a known algorithm.
    pub fn with_algorithm(secret: &str, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token: signature, expiry, and
    /// token class.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthorized(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token: signature, expiry, and
    /// token class. Revocation is checked separately against the store.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthorized(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthorized("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthorized("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthorized("Invalid token signature")
                    }
                    _ => AppError::unauthorized(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::claims::{Claims, TokenType};
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use opshub_core::error::ErrorKind;
    use uuid::Uuid;

    const SECRET: &str = "decoder-test-secret";

    fn sign(claims: &Claims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn claims(exp_offset_secs: i64, token_type: TokenType) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "subject1234567890x".to_string(),
            iat: now,
            exp: now + exp_offset_secs,
            jti: Uuid::new_v4(),
            token_type,
        }
    }

    fn decoder() -> JwtDecoder {
        JwtDecoder::with_algorithm(SECRET, Algorithm::HS256)
    }

    #[test]
    fn test_valid_access_token() {
        let token = sign(&claims(600, TokenType::Access));
        let decoded = decoder().decode_access_token(&token).unwrap();
        assert_eq!(decoded.sub, "subject1234567890x");
    }

    #[test]
    fn test_expired_token_rejected() {
        // Well past the 5-second leeway.
        let token = sign(&claims(-120, TokenType::Access));
        let err = decoder().decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn test_wrong_class_rejected() {
        let token = sign(&claims(600, TokenType::Access));
        let err = decoder().decode_refresh_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
