//! Server group, permission grant, and membership models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named group scoped to one server.
///
/// The slug derived from the name is the stable per-server uniqueness key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServerGroup {
    /// Internal database identifier.
    pub id: i64,
    /// The server this group belongs to.
    pub server_id: i64,
    /// Display name.
    pub name: String,
    /// Slugified name, unique within the server.
    pub slug: String,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
}

/// A single permission value granted to a group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupPermission {
    /// Internal database identifier.
    pub id: i64,
    /// The owning group.
    pub group_id: i64,
    /// Slugified permission value, or the wildcard `*`.
    pub value: String,
}

/// A user's membership in a server group. Each row is independently
/// revocable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupMembership {
    /// Internal database identifier.
    pub id: i64,
    /// The member.
    pub user_id: i64,
    /// The group.
    pub group_id: i64,
    /// When the membership was granted.
    pub created_at: DateTime<Utc>,
}

/// One access path of a user onto a server, seen from the server side.
///
/// The union of the operator row (synthetic group name `OPERATOR`) and one
/// row per group membership under the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServerUser {
    /// Internal user identifier.
    pub id: i64,
    /// User login name.
    pub name: String,
    /// Group label: the group's name, or `OPERATOR` for the owner.
    pub group_name: String,
    /// Group slug; `None` on the operator row.
    pub group_slug: Option<String>,
    /// Membership row id; `None` on the operator row.
    pub membership_id: Option<i64>,
}
