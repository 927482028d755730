//! Server repository implementation.
//!
//! The listing and resolution queries are unions over the two access
//! paths onto a server: direct ownership and group membership.

use sqlx::PgPool;

use opshub_core::error::{AppError, ErrorKind};
use opshub_core::result::AppResult;
use opshub_core::types::pagination::{PageRequest, PageResponse};
use opshub_entity::group::ServerUser;
use opshub_entity::server::{CreateServer, Server, ServerAccess, ServerSummary, UpdateServer};

/// Synthetic group label for the ownership access path.
pub const OPERATOR_LABEL: &str = "OPERATOR";

/// Repository for server CRUD, listing, and access resolution.
#[derive(Debug, Clone)]
pub struct ServerRepository {
    pool: PgPool,
}

impl ServerRepository {
    /// Create a new server repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a server by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Server>> {
        sqlx::query_as::<_, Server>("SELECT * FROM servers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find server by id", e)
            })
    }

    /// Register a new server and its implicit "Administrator" group
    /// holding the wildcard grant, in one transaction.
    ///
    /// The per-operator cap is enforced inside the INSERT itself: when the
    /// operator already owns `max_per_user` servers the statement inserts
    /// nothing, so a concurrent burst of registrations cannot overshoot
    /// the cap.
    pub async fn create_with_admin_group(
        &self,
        data: &CreateServer,
        max_per_user: u32,
    ) -> AppResult<Server> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let server = sqlx::query_as::<_, Server>(
            "INSERT INTO servers (public_id, name, module, address, port, secret_hash, operator_id) \
             SELECT $1, $2, $3, $4, $5, $6, $7 \
             WHERE (SELECT COUNT(*) FROM servers WHERE operator_id = $7) < $8 \
             RETURNING *",
        )
        .bind(&data.public_id)
        .bind(&data.name)
        .bind(&data.module)
        .bind(&data.address)
        .bind(data.port)
        .bind(&data.secret_hash)
        .bind(data.operator_id)
        .bind(max_per_user as i64)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("servers_operator_id_name_key") =>
            {
                AppError::conflict(format!("Server '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create server", e),
        })?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Server limit reached ({max_per_user} per operator)"
            ))
        })?;

        let group_id: i64 = sqlx::query_scalar(
            "INSERT INTO server_groups (server_id, name, slug) \
             VALUES ($1, 'Administrator', 'administrator') \
             RETURNING id",
        )
        .bind(server.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create admin group", e)
        })?;

        sqlx::query("INSERT INTO server_group_permissions (group_id, value) VALUES ($1, '*')")
            .bind(group_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to grant wildcard", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(server)
    }

    /// Partially update a server's name, address, and port.
    pub async fn update(&self, server_id: i64, data: &UpdateServer) -> AppResult<Server> {
        sqlx::query_as::<_, Server>(
            "UPDATE servers SET name = COALESCE($2, name), \
                                address = COALESCE($3, address), \
                                port = COALESCE($4, port) \
             WHERE id = $1 RETURNING *",
        )
        .bind(server_id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(data.port)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("servers_operator_id_name_key") =>
            {
                AppError::conflict("A server with that name already exists".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update server", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Server {server_id} not found")))
    }

    /// Replace a server's shared-secret hash.
    pub async fn update_secret(&self, server_id: i64, secret_hash: &str) -> AppResult<()> {
        let result = sqlx::query("UPDATE servers SET secret_hash = $2 WHERE id = $1")
            .bind(server_id)
            .bind(secret_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update secret", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Server {server_id} not found")));
        }
        Ok(())
    }

    /// Delete a server. Its groups, their permission grants, and their
    /// memberships go with it via the store-level cascade.
    pub async fn delete(&self, server_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM servers WHERE id = $1")
            .bind(server_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete server", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Admin-wide paginated listing.
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<ServerSummary>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM servers")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count servers", e)
            })?;

        let servers = sqlx::query_as::<_, ServerSummary>(
            "SELECT id, public_id, name, module, operator_id, created_at \
             FROM servers ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list servers", e))?;

        Ok(PageResponse::new(
            servers,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Every server a user can reach, tagged with the access path:
    /// directly owned rows carry the synthetic `OPERATOR` label, rows
    /// reached through membership carry the group and membership ids.
    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<ServerAccess>> {
        sqlx::query_as::<_, ServerAccess>(
            "SELECT s.id, s.public_id, s.name, \
                    $2::varchar AS group_name, NULL::varchar AS group_slug, NULL::bigint AS membership_id \
             FROM servers s \
             WHERE s.operator_id = $1 \
             UNION ALL \
             SELECT s.id, s.public_id, s.name, \
                    g.name AS group_name, g.slug AS group_slug, m.id AS membership_id \
             FROM servers s \
             JOIN server_groups g ON g.server_id = s.id \
             JOIN users_server_groups m ON m.group_id = g.id \
             WHERE m.user_id = $1 \
             ORDER BY id",
        )
        .bind(user_id)
        .bind(OPERATOR_LABEL)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list servers for user", e)
        })
    }

    /// Every user with access to a server: the operator (synthetic
    /// `OPERATOR` label) plus one row per group membership.
    pub async fn list_users(&self, server_id: i64) -> AppResult<Vec<ServerUser>> {
        sqlx::query_as::<_, ServerUser>(
            "SELECT u.id, u.name, \
                    $2::varchar AS group_name, NULL::varchar AS group_slug, NULL::bigint AS membership_id \
             FROM users u \
             JOIN servers s ON s.operator_id = u.id \
             WHERE s.id = $1 \
             UNION ALL \
             SELECT u.id, u.name, \
                    g.name AS group_name, g.slug AS group_slug, m.id AS membership_id \
             FROM users u \
             JOIN users_server_groups m ON m.user_id = u.id \
             JOIN server_groups g ON m.group_id = g.id \
             WHERE g.server_id = $1 \
             ORDER BY id",
        )
        .bind(server_id)
        .bind(OPERATOR_LABEL)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users for server", e)
        })
    }

    /// Resolve a public server id to the internal id, but only for a user
    /// who is the operator or a member of some group under the server.
    /// Doubles as the access check for server-scoped endpoints.
    pub async fn resolve_public_id(
        &self,
        public_id: &str,
        user_id: i64,
    ) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "SELECT s.id FROM servers s \
             WHERE s.public_id = $1 AND s.operator_id = $2 \
             UNION \
             SELECT s.id FROM servers s \
             JOIN server_groups g ON g.server_id = s.id \
             JOIN users_server_groups m ON m.group_id = g.id \
             WHERE s.public_id = $1 AND m.user_id = $2 \
             LIMIT 1",
        )
        .bind(public_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to resolve server id", e)
        })
    }
}
