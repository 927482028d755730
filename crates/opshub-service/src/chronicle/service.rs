//! Best-effort audit trail recording.

use std::sync::Arc;

use tracing::warn;

use opshub_database::repositories::chronicle::ChronicleRepository;
use opshub_entity::chronicle::CreateChronicleEntry;

/// Chronicle event codes.
pub mod event {
    /// A new account was registered.
    pub const REGISTER: &str = "user.register";
    /// A login succeeded.
    pub const LOGIN: &str = "user.login";
    /// A login failed against an existing account.
    pub const LOGIN_FAILED: &str = "user.login_failed";
    /// The login name was changed.
    pub const NAME_CHANGE: &str = "user.name_change";
    /// The email address was changed.
    pub const EMAIL_CHANGE: &str = "user.email_change";
    /// The password was changed.
    pub const PASSWORD_CHANGE: &str = "user.password_change";
    /// A server was registered.
    pub const SERVER_CREATE: &str = "server.create";
    /// A server was deleted.
    pub const SERVER_DELETE: &str = "server.delete";
}

/// Appends chronicle entries.
///
/// Recording is best effort: the chronicle must never fail the operation
/// it describes, so errors are logged and swallowed here.
#[derive(Debug, Clone)]
pub struct ChronicleService {
    /// Chronicle repository.
    repo: Arc<ChronicleRepository>,
}

impl ChronicleService {
    /// Creates a new chronicle service.
    pub fn new(repo: Arc<ChronicleRepository>) -> Self {
        Self { repo }
    }

    /// Records one event.
    pub async fn record(
        &self,
        initiator_id: i64,
        event_code: &str,
        ip_address: &str,
        user_agent: &str,
        details: Option<String>,
        target_id: Option<i64>,
    ) {
        let entry = CreateChronicleEntry {
            initiator_id,
            target_id,
            event_code: event_code.to_string(),
            details,
            user_agent: user_agent.to_string(),
            ip_address: ip_address.to_string(),
        };

        if let Err(e) = self.repo.append(&entry).await {
            warn!(
                initiator_id,
                event_code,
                error = %e,
                "Failed to append chronicle entry"
            );
        }
    }
}
