//! Request DTOs with validation.
//!
//! Syntactic rules (length, charset, email shape) live here; semantic
//! policy (uniqueness, cooldowns, reserved names) belongs to the service
//! layer.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name.
    #[validate(length(min = 3, max = 32), custom(function = validate_name))]
    pub name: String,
    /// Email address.
    #[validate(email, length(max = 64))]
    pub email: String,
    /// Password.
    #[validate(length(min = 7, max = 72), custom(function = validate_password))]
    pub password: String,
}

/// Login request body. `name` accepts either the login name or the email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name or email.
    #[validate(length(min = 3, max = 64))]
    pub name: String,
    /// Password.
    #[validate(length(min = 7, max = 72))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Login name change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeNameRequest {
    /// New login name.
    #[validate(length(min = 3, max = 32), custom(function = validate_name))]
    pub name: String,
}

/// Email change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeEmailRequest {
    /// New email address.
    #[validate(email, length(max = 64))]
    pub email: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 7, max = 72))]
    pub password: String,
    /// New password.
    #[validate(length(min = 7, max = 72), custom(function = validate_password))]
    pub new_password: String,
}

/// Server registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateServerRequest {
    /// Display name.
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    /// Module identifier.
    #[validate(length(min = 1, max = 12))]
    pub module: String,
    /// Network address.
    #[validate(length(min = 1, max = 45))]
    pub address: String,
    /// Network port.
    #[validate(range(min = 1, max = 65535))]
    pub port: i32,
    /// Shared secret (hashed before storage).
    #[validate(length(min = 7, max = 72))]
    pub secret: String,
}

/// Partial server update request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateServerRequest {
    /// New display name.
    #[validate(length(min = 1, max = 32))]
    pub name: Option<String>,
    /// New network address.
    #[validate(length(min = 1, max = 45))]
    pub address: Option<String>,
    /// New network port.
    #[validate(range(min = 1, max = 65535))]
    pub port: Option<i32>,
}

/// Shared secret rotation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RotateSecretRequest {
    /// New shared secret (hashed before storage).
    #[validate(length(min = 7, max = 72))]
    pub secret: String,
}

/// Group creation request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    /// Group display name.
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    /// Initial permission values.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Group rename request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameGroupRequest {
    /// New group name.
    #[validate(length(min = 1, max = 32))]
    pub name: String,
}

/// Permission grant request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GrantPermissionRequest {
    /// Permission value (slugified before storage) or the wildcard `*`.
    #[validate(length(min = 1, max = 32))]
    pub value: String,
}

/// Membership grant request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddMemberRequest {
    /// Login name or email of the user to add.
    #[validate(length(min = 3, max = 64))]
    pub user: String,
}

/// Login names are restricted to Latin letters, digits, and spaces.
fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ')
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("name_charset");
        err.message = Some("Name can only consist of Latin letters and numbers".into());
        Err(err)
    }
}

/// Passwords are restricted to Latin letters, digits, and common special
/// characters.
fn validate_password(value: &str) -> Result<(), ValidationError> {
    const SPECIALS: &str = "!@#$%^&*()_+=-[]{};:'\"|,.<>/?";
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_charset");
        err.message = Some(
            "Password can only consist of Latin characters, numbers and special characters".into(),
        );
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Passw0rd!".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_bad_name() {
        let req = RegisterRequest {
            name: "al<ice>".to_string(),
            email: "alice@example.com".to_string(),
            password: "Passw0rd!".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let req = RegisterRequest {
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_server_request_port_range() {
        let req = CreateServerRequest {
            name: "web1".to_string(),
            module: "minecraft".to_string(),
            address: "10.0.0.5".to_string(),
            port: 70000,
            secret: "sup3r-secret".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
