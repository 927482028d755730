//! Chronicle repository — append-only audit trail.

use sqlx::PgPool;

use opshub_core::error::{AppError, ErrorKind};
use opshub_core::result::AppResult;
use opshub_core::types::pagination::{PageRequest, PageResponse};
use opshub_entity::chronicle::{ChronicleEntry, CreateChronicleEntry};

/// Repository for the user chronicle. Entries are only ever appended.
#[derive(Debug, Clone)]
pub struct ChronicleRepository {
    pool: PgPool,
}

impl ChronicleRepository {
    /// Create a new chronicle repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one chronicle entry.
    pub async fn append(&self, data: &CreateChronicleEntry) -> AppResult<ChronicleEntry> {
        sqlx::query_as::<_, ChronicleEntry>(
            "INSERT INTO user_chronicles \
             (initiator_id, target_id, event_code, details, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.initiator_id)
        .bind(data.target_id)
        .bind(&data.event_code)
        .bind(&data.details)
        .bind(&data.user_agent)
        .bind(&data.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append chronicle", e))
    }

    /// Entries initiated by a user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ChronicleEntry>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_chronicles WHERE initiator_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count chronicle", e)
                })?;

        let entries = sqlx::query_as::<_, ChronicleEntry>(
            "SELECT * FROM user_chronicles WHERE initiator_id = $1 \
             ORDER BY id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list chronicle", e))?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
