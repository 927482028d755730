//! Group, permission, and membership handlers.
//!
//! All routes are scoped under a server's public id. Resolution doubles
//! as the visibility check; mutating routes additionally require the
//! management permission.

use axum::Json;
use axum::extract::{Path, State};

use opshub_core::error::AppError;

use crate::dto::request::{
    AddMemberRequest, CreateGroupRequest, GrantPermissionRequest, RenameGroupRequest,
};
use crate::dto::response::{
    ApiResponse, GroupResponse, MembershipResponse, MessageResponse, PermissionResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_payload;
use crate::state::AppState;

/// GET /api/servers/{public_id}/groups
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(public_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<GroupResponse>>>, ApiError> {
    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    let groups = state.group_service.list_for_server(server_id).await?;

    Ok(Json(ApiResponse::ok(
        groups.into_iter().map(GroupResponse::from).collect(),
    )))
}

/// POST /api/servers/{public_id}/groups
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(public_id): Path<String>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<ApiResponse<GroupResponse>>, ApiError> {
    validate_payload(&req)?;

    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    state.server_service.ensure_manage(&auth, server_id).await?;

    let group = state
        .group_service
        .create(server_id, &req.name, &req.permissions)
        .await?;

    Ok(Json(ApiResponse::ok(GroupResponse::from(group))))
}

/// PUT /api/servers/{public_id}/groups/{slug}
pub async fn rename(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug)): Path<(String, String)>,
    Json(req): Json<RenameGroupRequest>,
) -> Result<Json<ApiResponse<GroupResponse>>, ApiError> {
    validate_payload(&req)?;

    let group = resolve_managed_group(&state, &auth, &public_id, &slug).await?;
    let group = state.group_service.rename(group.id, &req.name).await?;

    Ok(Json(ApiResponse::ok(GroupResponse::from(group))))
}

/// DELETE /api/servers/{public_id}/groups/{slug}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let group = resolve_managed_group(&state, &auth, &public_id, &slug).await?;
    state.group_service.delete(group.id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Group deleted"))))
}

/// GET /api/servers/{public_id}/groups/{slug}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<PermissionResponse>>>, ApiError> {
    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    let group = state.group_service.resolve_slug(server_id, &slug).await?;
    let permissions = state.group_service.list_permissions(group.id).await?;

    Ok(Json(ApiResponse::ok(
        permissions
            .into_iter()
            .map(PermissionResponse::from)
            .collect(),
    )))
}

/// POST /api/servers/{public_id}/groups/{slug}/permissions
pub async fn grant_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug)): Path<(String, String)>,
    Json(req): Json<GrantPermissionRequest>,
) -> Result<Json<ApiResponse<PermissionResponse>>, ApiError> {
    validate_payload(&req)?;

    let group = resolve_managed_group(&state, &auth, &public_id, &slug).await?;
    let permission = state
        .group_service
        .grant_permission(group.id, &req.value)
        .await?;

    Ok(Json(ApiResponse::ok(PermissionResponse::from(permission))))
}

/// DELETE /api/servers/{public_id}/groups/{slug}/permissions/{permission_id}
pub async fn revoke_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug, permission_id)): Path<(String, String, i64)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let group = resolve_managed_group(&state, &auth, &public_id, &slug).await?;
    state
        .group_service
        .revoke_permission(group.id, permission_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Permission revoked",
    ))))
}

/// POST /api/servers/{public_id}/groups/{slug}/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug)): Path<(String, String)>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse<MembershipResponse>>, ApiError> {
    validate_payload(&req)?;

    let group = resolve_managed_group(&state, &auth, &public_id, &slug).await?;

    let user_id = state
        .user_service
        .find_id(&req.user)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let membership = state.group_service.add_member(group.id, user_id).await?;

    Ok(Json(ApiResponse::ok(MembershipResponse::from(membership))))
}

/// DELETE /api/servers/{public_id}/groups/{slug}/members/{membership_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((public_id, slug, membership_id)): Path<(String, String, i64)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let group = resolve_managed_group(&state, &auth, &public_id, &slug).await?;
    state
        .group_service
        .remove_member(group.id, membership_id)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Membership revoked",
    ))))
}

/// Resolve server + group and require management rights on the server.
async fn resolve_managed_group(
    state: &AppState,
    auth: &AuthUser,
    public_id: &str,
    slug: &str,
) -> Result<opshub_entity::group::ServerGroup, ApiError> {
    let server_id = state.server_service.resolve(auth, public_id).await?;
    state.server_service.ensure_manage(auth, server_id).await?;
    let group = state.group_service.resolve_slug(server_id, slug).await?;
    Ok(group)
}
