//! Cache key builders.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the application uses.

use uuid::Uuid;

/// Key for a live (unrevoked) refresh token. Presence means the token is
/// still valid; absence means revoked or expired.
pub fn refresh_token(jti: &Uuid) -> String {
    format!("refreshtoken:{jti}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_key() {
        let jti = Uuid::nil();
        assert_eq!(
            refresh_token(&jti),
            "refreshtoken:00000000-0000-0000-0000-000000000000"
        );
    }
}
