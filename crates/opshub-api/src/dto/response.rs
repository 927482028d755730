//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opshub_entity::group::{GroupMembership, GroupPermission, ServerGroup, ServerUser};
use opshub_entity::server::{Server, ServerAccess};
use opshub_entity::user::User;

/// Generic success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in a success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain message payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Build a message payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Token pair issued on login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    /// Short-lived access token.
    pub access_token: String,
    /// Longer-lived refresh token.
    pub refresh_token: String,
    /// Token scheme.
    pub token_type: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

/// The caller's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Login name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Account creation time.
    pub datetime_create: DateTime<Utc>,
    /// Last password change time.
    pub hash_datetime_update: DateTime<Utc>,
    /// Present (and true) only for administrators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            datetime_create: user.created_at,
            hash_datetime_update: user.hash_updated_at,
            is_admin: user.is_admin.then_some(true),
        }
    }
}

/// A server as seen by users with access to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerResponse {
    /// Public identifier.
    pub public_id: String,
    /// Display name.
    pub name: String,
    /// Module identifier.
    pub module: String,
    /// Network address.
    pub address: String,
    /// Network port.
    pub port: i32,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<Server> for ServerResponse {
    fn from(server: Server) -> Self {
        Self {
            public_id: server.public_id,
            name: server.name,
            module: server.module,
            address: server.address,
            port: server.port,
            created_at: server.created_at,
        }
    }
}

/// One access path of the caller onto a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerAccessResponse {
    /// Public server identifier.
    pub public_id: String,
    /// Server display name.
    pub name: String,
    /// Access label: the group's name, or `OPERATOR` for ownership.
    pub group_name: String,
    /// Group slug; absent on the ownership row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_slug: Option<String>,
    /// Membership row id; absent on the ownership row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<i64>,
}

impl From<ServerAccess> for ServerAccessResponse {
    fn from(row: ServerAccess) -> Self {
        Self {
            public_id: row.public_id,
            name: row.name,
            group_name: row.group_name,
            group_slug: row.group_slug,
            membership_id: row.membership_id,
        }
    }
}

/// One user with access to a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerUserResponse {
    /// User login name.
    pub name: String,
    /// Access label: the group's name, or `OPERATOR` for the owner.
    pub group_name: String,
    /// Group slug; absent on the operator row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_slug: Option<String>,
    /// Membership row id; absent on the operator row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<i64>,
}

impl From<ServerUser> for ServerUserResponse {
    fn from(row: ServerUser) -> Self {
        Self {
            name: row.name,
            group_name: row.group_name,
            group_slug: row.group_slug,
            membership_id: row.membership_id,
        }
    }
}

/// A group under a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    /// Group id (used in management endpoints).
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Slug — the stable per-server key.
    pub slug: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<ServerGroup> for GroupResponse {
    fn from(group: ServerGroup) -> Self {
        Self {
            id: group.id,
            name: group.name,
            slug: group.slug,
            created_at: group.created_at,
        }
    }
}

/// A permission grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Grant id (used to revoke).
    pub id: i64,
    /// Permission value.
    pub value: String,
}

impl From<GroupPermission> for PermissionResponse {
    fn from(permission: GroupPermission) -> Self {
        Self {
            id: permission.id,
            value: permission.value,
        }
    }
}

/// A granted membership.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    /// Membership id (used to revoke).
    pub id: i64,
    /// When the membership was granted.
    pub created_at: DateTime<Utc>,
}

impl From<GroupMembership> for MembershipResponse {
    fn from(membership: GroupMembership) -> Self {
        Self {
            id: membership.id,
            created_at: membership.created_at,
        }
    }
}

/// Health payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Database reachability.
    pub database: String,
    /// Cache reachability.
    pub cache: String,
}
