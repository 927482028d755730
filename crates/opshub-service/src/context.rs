//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting and from *where*.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's internal id.
    pub user_id: i64,
    /// The authenticated user's public identifier (the token subject).
    pub public_id: String,
    /// Whether the user carries the administrator flag.
    pub is_admin: bool,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: i64,
        public_id: String,
        is_admin: bool,
        ip_address: String,
        user_agent: String,
    ) -> Self {
        Self {
            user_id,
            public_id,
            is_admin,
            ip_address,
            user_agent,
            request_time: Utc::now(),
        }
    }
}
