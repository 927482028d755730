//! Server entity model and list projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A managed server owned by exactly one user (its operator).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Server {
    /// Internal database identifier.
    pub id: i64,
    /// Opaque public identifier.
    pub public_id: String,
    /// Display name, unique per operator.
    pub name: String,
    /// Game/service module this server runs.
    pub module: String,
    /// Network address.
    pub address: String,
    /// Network port.
    pub port: i32,
    /// Hash of the shared secret used by the server itself.
    #[serde(skip_serializing)]
    pub secret_hash: String,
    /// The owning user.
    pub operator_id: i64,
    /// When the server was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a new server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServer {
    /// Generated public identifier.
    pub public_id: String,
    /// Display name.
    pub name: String,
    /// Module identifier.
    pub module: String,
    /// Network address.
    pub address: String,
    /// Network port.
    pub port: i32,
    /// Hash of the shared secret.
    pub secret_hash: String,
    /// The owning user.
    pub operator_id: i64,
}

/// Partial update of a server's mutable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServer {
    /// New display name.
    pub name: Option<String>,
    /// New network address.
    pub address: Option<String>,
    /// New network port.
    pub port: Option<i32>,
}

/// Admin-wide listing projection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServerSummary {
    /// Internal identifier.
    pub id: i64,
    /// Public identifier.
    pub public_id: String,
    /// Display name.
    pub name: String,
    /// Module identifier.
    pub module: String,
    /// Owning user.
    pub operator_id: i64,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// One access path of a user onto a server.
///
/// Rows come from the union of direct ownership (synthetic group name
/// `OPERATOR`, no slug or membership) and group membership (the actual
/// group and the membership row granting it).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServerAccess {
    /// Internal server identifier.
    pub id: i64,
    /// Public server identifier.
    pub public_id: String,
    /// Server display name.
    pub name: String,
    /// Group label: the group's name, or `OPERATOR` for direct ownership.
    pub group_name: String,
    /// Group slug; `None` on the ownership row.
    pub group_slug: Option<String>,
    /// Membership row id; `None` on the ownership row.
    pub membership_id: Option<i64>,
}
