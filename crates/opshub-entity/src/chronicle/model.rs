//! Chronicle entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable chronicle entry recording a user-initiated event.
///
/// Rows are append-only; the application never updates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChronicleEntry {
    /// Internal database identifier.
    pub id: i64,
    /// The user who initiated the event.
    pub initiator_id: i64,
    /// The user the event acted upon, when different from the initiator.
    pub target_id: Option<i64>,
    /// Event code (e.g. `"user.login"`, `"user.password_change"`).
    pub event_code: String,
    /// Free-text details.
    pub details: Option<String>,
    /// User-Agent header of the originating request.
    pub user_agent: String,
    /// Network address of the originating request.
    pub ip_address: String,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a chronicle entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChronicleEntry {
    /// The initiating user.
    pub initiator_id: i64,
    /// Optional target user.
    pub target_id: Option<i64>,
    /// Event code.
    pub event_code: String,
    /// Free-text details.
    pub details: Option<String>,
    /// Originating User-Agent.
    pub user_agent: String,
    /// Originating network address.
    pub ip_address: String,
}
