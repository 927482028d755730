//! Server lifecycle and access resolution.

use std::sync::Arc;

use tracing::info;

use opshub_core::error::AppError;
use opshub_core::types::ident::public_id;
use opshub_core::types::pagination::{PageRequest, PageResponse};
use opshub_database::repositories::group::GroupRepository;
use opshub_database::repositories::server::ServerRepository;
use opshub_entity::group::ServerUser;
use opshub_entity::server::{CreateServer, Server, ServerAccess, ServerSummary, UpdateServer};

use crate::chronicle::{ChronicleService, event};
use crate::context::RequestContext;

/// Permission value gating server-scoped management operations. Operators
/// pass implicitly; the wildcard grant covers it like any other value.
pub const MANAGE_PERMISSION: &str = "administration";

/// Handles server registration, mutation, listing, and the implicit
/// access check that resolves public server ids.
#[derive(Debug, Clone)]
pub struct ServerService {
    /// Server repository.
    servers: Arc<ServerRepository>,
    /// Group repository (permission checks).
    groups: Arc<GroupRepository>,
    /// Audit trail.
    chronicle: Arc<ChronicleService>,
    /// Per-operator ownership cap.
    max_per_user: u32,
}

impl ServerService {
    /// Creates a new server service.
    pub fn new(
        servers: Arc<ServerRepository>,
        groups: Arc<GroupRepository>,
        chronicle: Arc<ChronicleService>,
        max_per_user: u32,
    ) -> Self {
        Self {
            servers,
            groups,
            chronicle,
            max_per_user,
        }
    }

    /// Registers a new server owned by the calling user.
    ///
    /// The repository enforces both the `(operator, name)` uniqueness and
    /// the ownership cap, and creates the implicit "Administrator" group
    /// holding the wildcard grant.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        module: &str,
        address: &str,
        port: i32,
        secret_hash: &str,
    ) -> Result<Server, AppError> {
        let data = CreateServer {
            public_id: public_id(),
            name: name.to_string(),
            module: module.to_string(),
            address: address.to_string(),
            port,
            secret_hash: secret_hash.to_string(),
            operator_id: ctx.user_id,
        };

        let server = self
            .servers
            .create_with_admin_group(&data, self.max_per_user)
            .await?;

        info!(
            server_id = server.id,
            operator_id = ctx.user_id,
            name = %server.name,
            "Server registered"
        );
        self.chronicle
            .record(
                ctx.user_id,
                event::SERVER_CREATE,
                &ctx.ip_address,
                &ctx.user_agent,
                Some(server.name.clone()),
                None,
            )
            .await;

        Ok(server)
    }

    /// Resolves a public server id for the calling user.
    ///
    /// Succeeds only when the user is the operator or a member of some
    /// group under the server — resolution *is* the access check for
    /// read-side operations.
    pub async fn resolve(&self, ctx: &RequestContext, public_id: &str) -> Result<i64, AppError> {
        self.servers
            .resolve_public_id(public_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Server not found"))
    }

    /// Requires the calling user to be allowed to manage the server:
    /// the operator, or a group member holding the management permission
    /// (the wildcard grant qualifies).
    pub async fn ensure_manage(&self, ctx: &RequestContext, server_id: i64) -> Result<(), AppError> {
        let allowed = self
            .groups
            .has_permission(server_id, ctx.user_id, MANAGE_PERMISSION)
            .await?;

        if !allowed {
            return Err(AppError::unauthorized(
                "Insufficient permissions to manage this server",
            ));
        }
        Ok(())
    }

    /// Whether the user may perform `permission` on the server.
    pub async fn has_permission(
        &self,
        server_id: i64,
        user_id: i64,
        permission: &str,
    ) -> Result<bool, AppError> {
        self.groups
            .has_permission(server_id, user_id, permission)
            .await
    }

    /// Partially updates name, address, and port.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        server_id: i64,
        data: &UpdateServer,
    ) -> Result<Server, AppError> {
        self.ensure_manage(ctx, server_id).await?;

        if data.name.is_none() && data.address.is_none() && data.port.is_none() {
            return Err(AppError::validation("Nothing to update"));
        }

        self.servers.update(server_id, data).await
    }

    /// Replaces the server's shared-secret hash.
    pub async fn rotate_secret(
        &self,
        ctx: &RequestContext,
        server_id: i64,
        new_hash: &str,
    ) -> Result<(), AppError> {
        self.ensure_manage(ctx, server_id).await?;
        self.servers.update_secret(server_id, new_hash).await
    }

    /// Deletes a server; groups, grants, and memberships cascade.
    pub async fn delete(&self, ctx: &RequestContext, server_id: i64) -> Result<(), AppError> {
        self.ensure_manage(ctx, server_id).await?;

        let deleted = self.servers.delete(server_id).await?;
        if !deleted {
            return Err(AppError::not_found("Server not found"));
        }

        info!(server_id, user_id = ctx.user_id, "Server deleted");
        self.chronicle
            .record(
                ctx.user_id,
                event::SERVER_DELETE,
                &ctx.ip_address,
                &ctx.user_agent,
                Some(server_id.to_string()),
                None,
            )
            .await;

        Ok(())
    }

    /// Admin-wide paginated listing.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<ServerSummary>, AppError> {
        if !ctx.is_admin {
            return Err(AppError::unauthorized("Administrator access required"));
        }
        self.servers.list(page).await
    }

    /// Every server the calling user can reach, tagged with the access
    /// path (ownership or group membership).
    pub async fn list_for_user(&self, ctx: &RequestContext) -> Result<Vec<ServerAccess>, AppError> {
        self.servers.list_for_user(ctx.user_id).await
    }

    /// Every user with access to the server. Callers reach this through
    /// `resolve`, which already established that the requester may see
    /// the roster.
    pub async fn list_users(&self, server_id: i64) -> Result<Vec<ServerUser>, AppError> {
        self.servers.list_users(server_id).await
    }
}
