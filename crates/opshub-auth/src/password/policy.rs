//! Password lifecycle policy.
//!
//! Two rules govern password changes: a new password must differ from the
//! current one, and repeated changes are subject to a cooldown window
//! measured from the last change. The first-ever change after account
//! creation is exempt from the cooldown.

use chrono::{DateTime, Utc};

use opshub_core::config::auth::AuthConfig;
use opshub_core::error::AppError;

/// Enforces the password-change lifecycle rules.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum seconds between password changes.
    cooldown_seconds: i64,
}

impl PasswordPolicy {
    /// Creates a new policy from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            cooldown_seconds: config.password_cooldown_seconds as i64,
        }
    }

    /// Creates a policy with an explicit cooldown, for tests.
    pub fn with_cooldown_seconds(cooldown_seconds: i64) -> Self {
        Self { cooldown_seconds }
    }

    /// Checks whether another password change is allowed yet.
    ///
    /// `hash_updated_at == created_at` means the account has never changed
    /// its password, and the cooldown does not apply.
    pub fn check_cooldown(
        &self,
        hash_updated_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if hash_updated_at == created_at {
            return Ok(());
        }

        let elapsed = (now - hash_updated_at).num_seconds();
        if elapsed < self.cooldown_seconds {
            let remaining = self.cooldown_seconds - elapsed;
            return Err(AppError::rate_limited(format!(
                "Password was changed recently; try again in {remaining} seconds"
            )));
        }

        Ok(())
    }

    /// Rejects a new password equal to the current one. Compared as
    /// plaintext before hashing.
    pub fn check_reuse(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must differ from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use opshub_core::error::ErrorKind;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::with_cooldown_seconds(86400)
    }

    #[test]
    fn test_first_change_is_exempt() {
        let p = policy();
        let created = Utc::now() - Duration::seconds(10);
        // hash_updated_at still equals created_at: never changed.
        assert!(p.check_cooldown(created, created, Utc::now()).is_ok());
    }

    #[test]
    fn test_within_cooldown_is_rejected() {
        let p = policy();
        let created = Utc::now() - Duration::days(30);
        let changed = Utc::now() - Duration::hours(1);
        let err = p.check_cooldown(changed, created, Utc::now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimited);
    }

    #[test]
    fn test_after_cooldown_is_allowed() {
        let p = policy();
        let created = Utc::now() - Duration::days(30);
        let changed = Utc::now() - Duration::days(2);
        assert!(p.check_cooldown(changed, created, Utc::now()).is_ok());
    }

    #[test]
    fn test_reuse_is_rejected() {
        let p = policy();
        let err = p.check_reuse("Same1!", "Same1!").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(p.check_reuse("Old1!", "New1!").is_ok());
    }
}
