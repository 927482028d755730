//! Group, permission grant, and membership repository.

use sqlx::PgPool;

use opshub_core::error::{AppError, ErrorKind};
use opshub_core::result::AppResult;
use opshub_entity::group::{GroupMembership, GroupPermission, ServerGroup};

/// Repository for server groups, their permission grants, and memberships.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a group by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<ServerGroup>> {
        sqlx::query_as::<_, ServerGroup>("SELECT * FROM server_groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find group by id", e)
            })
    }

    /// Resolve a slug to the group under the given server.
    pub async fn find_by_slug(&self, server_id: i64, slug: &str) -> AppResult<Option<ServerGroup>> {
        sqlx::query_as::<_, ServerGroup>(
            "SELECT * FROM server_groups WHERE server_id = $1 AND slug = $2",
        )
        .bind(server_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find group by slug", e)
        })
    }

    /// Create a group under a server together with its initial permission
    /// grants, in one transaction. The `(server, slug)` unique constraint
    /// is the final arbiter of name collisions.
    pub async fn create_with_permissions(
        &self,
        server_id: i64,
        name: &str,
        slug: &str,
        permissions: &[String],
    ) -> AppResult<ServerGroup> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let group = sqlx::query_as::<_, ServerGroup>(
            "INSERT INTO server_groups (server_id, name, slug) \
             VALUES ($1, $2, $3) \
             RETURNING *",
        )
        .bind(server_id)
        .bind(name)
        .bind(slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_slug_conflict(e, name))?;

        for value in permissions {
            sqlx::query(
                "INSERT INTO server_group_permissions (group_id, value) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(group.id)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to grant permission", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(group)
    }

    /// Rename a group, recomputing its slug.
    pub async fn rename(&self, group_id: i64, name: &str, slug: &str) -> AppResult<ServerGroup> {
        sqlx::query_as::<_, ServerGroup>(
            "UPDATE server_groups SET name = $2, slug = $3 WHERE id = $1 RETURNING *",
        )
        .bind(group_id)
        .bind(name)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_slug_conflict(e, name))?
        .ok_or_else(|| AppError::not_found(format!("Group {group_id} not found")))
    }

    /// Delete a group; grants and memberships cascade at the store level.
    pub async fn delete(&self, group_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM server_groups WHERE id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// All groups under a server.
    pub async fn list_for_server(&self, server_id: i64) -> AppResult<Vec<ServerGroup>> {
        sqlx::query_as::<_, ServerGroup>(
            "SELECT * FROM server_groups WHERE server_id = $1 ORDER BY id",
        )
        .bind(server_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    /// Grant a permission value to a group.
    pub async fn add_permission(&self, group_id: i64, value: &str) -> AppResult<GroupPermission> {
        sqlx::query_as::<_, GroupPermission>(
            "INSERT INTO server_group_permissions (group_id, value) \
             VALUES ($1, $2) \
             RETURNING *",
        )
        .bind(group_id)
        .bind(value)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("server_group_permissions_group_id_value_key") =>
            {
                AppError::conflict(format!("Permission '{value}' is already granted"))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to grant permission", e),
        })
    }

    /// Revoke a permission grant. Scoped to the group so an id from
    /// another server cannot be revoked through the wrong route.
    pub async fn delete_permission(&self, group_id: i64, permission_id: i64) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM server_group_permissions WHERE id = $1 AND group_id = $2")
                .bind(permission_id)
                .bind(group_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to revoke permission", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    /// All permission grants of a group.
    pub async fn list_permissions(&self, group_id: i64) -> AppResult<Vec<GroupPermission>> {
        sqlx::query_as::<_, GroupPermission>(
            "SELECT * FROM server_group_permissions WHERE group_id = $1 ORDER BY id",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list permissions", e))
    }

    /// Add a user to a group.
    pub async fn add_member(&self, group_id: i64, user_id: i64) -> AppResult<GroupMembership> {
        sqlx::query_as::<_, GroupMembership>(
            "INSERT INTO users_server_groups (user_id, group_id) \
             VALUES ($1, $2) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add member", e))
    }

    /// Revoke a membership. Scoped to the group like `delete_permission`.
    pub async fn remove_member(&self, group_id: i64, membership_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users_server_groups WHERE id = $1 AND group_id = $2")
            .bind(membership_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove member", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether a user may perform `permission` on a server.
    ///
    /// True when the user is the server's operator (owners implicitly hold
    /// every permission), or belongs to a group under the server holding
    /// the exact value or the wildcard `*`.
    pub async fn has_permission(
        &self,
        server_id: i64,
        user_id: i64,
        permission: &str,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM servers WHERE id = $1 AND operator_id = $2) \
                 OR EXISTS(\
                    SELECT 1 FROM server_group_permissions p \
                    JOIN server_groups g ON p.group_id = g.id \
                    JOIN users_server_groups m ON m.group_id = g.id \
                    WHERE g.server_id = $1 AND m.user_id = $2 \
                      AND (p.value = $3 OR p.value = '*'))",
        )
        .bind(server_id)
        .bind(user_id)
        .bind(permission)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check permission", e))
    }
}

/// Map a `(server, slug)` unique violation to a conflict error.
fn map_slug_conflict(e: sqlx::Error, name: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("server_groups_server_id_slug_key") =>
        {
            AppError::conflict(format!("Group '{name}' already exists on this server"))
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to write group", e),
    }
}
