//! Authentication and credential configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing algorithm: `"HS256"`, `"HS384"`, or `"HS512"`.
    #[serde(default = "default_jwt_algorithm")]
    pub jwt_algorithm: String,
    /// Secret key for JWT signing.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in minutes. Also drives the revocation-store TTL.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_minutes: u64,
    /// bcrypt work factor for password hashing.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Minimum seconds between password changes. The first-ever change
    /// after account creation is exempt.
    #[serde(default = "default_password_cooldown")]
    pub password_cooldown_seconds: u64,
    /// Maximum number of servers a single operator may own.
    #[serde(default = "default_max_servers")]
    pub max_servers_per_user: u32,
    /// Upper bound of the uniform response delay on login/register, in
    /// milliseconds. Set to 0 to disable.
    #[serde(default = "default_login_delay")]
    pub login_delay_max_ms: u64,
}

fn default_jwt_algorithm() -> String {
    "HS256".to_string()
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    60 * 24
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_password_cooldown() -> u64 {
    86400
}

fn default_max_servers() -> u32 {
    10
}

fn default_login_delay() -> u64 {
    1200
}
