//! bcrypt password hashing and verification.

use opshub_core::error::AppError;

/// Handles password hashing and verification using bcrypt.
///
/// The work factor comes from configuration so interactive-login latency
/// can be tuned per deployment.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// bcrypt cost factor.
    cost: u32,
}

impl PasswordHasher {
    /// Creates a new password hasher with the given cost factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        // Minimum cost keeps the test suite fast.
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let h = hasher();
        let hash = h.hash("Passw0rd!").unwrap();
        assert!(h.verify("Passw0rd!", &hash).unwrap());
        assert!(!h.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let h = hasher();
        let a = h.hash("same-input").unwrap();
        let b = h.hash("same-input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_hash_is_error() {
        let h = hasher();
        assert!(h.verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
