//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Internal database identifier. Never leaves the application.
    pub id: i64,
    /// Unique login name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Opaque public identifier used at the API boundary and in token
    /// subjects.
    pub public_id: String,
    /// bcrypt password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the password hash was last changed. Equals `created_at` until
    /// the first password change.
    pub hash_updated_at: DateTime<Utc>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Administrator flag.
    pub is_admin: bool,
    /// Whether the account may authenticate.
    pub is_active: bool,
}

impl User {
    /// Whether this account has ever changed its password.
    pub fn has_changed_password(&self) -> bool {
        self.hash_updated_at != self.created_at
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired login name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Generated public identifier.
    pub public_id: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
