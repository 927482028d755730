//! Server management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};

use opshub_core::types::pagination::PageResponse;
use opshub_entity::server::{ServerSummary, UpdateServer};

use crate::dto::request::{CreateServerRequest, RotateSecretRequest, UpdateServerRequest};
use crate::dto::response::{
    ApiResponse, MessageResponse, ServerAccessResponse, ServerResponse, ServerUserResponse,
};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::validate_payload;
use crate::state::AppState;

/// POST /api/servers
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateServerRequest>,
) -> Result<Json<ApiResponse<ServerResponse>>, ApiError> {
    validate_payload(&req)?;

    let secret_hash = state.password_hasher.hash(&req.secret)?;
    let server = state
        .server_service
        .create(
            &auth,
            &req.name,
            &req.module,
            &req.address,
            req.port,
            &secret_hash,
        )
        .await?;

    Ok(Json(ApiResponse::ok(ServerResponse::from(server))))
}

/// GET /api/servers — admin-wide paginated listing.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ServerSummary>>>, ApiError> {
    let page = params.into_page_request();
    let servers = state.server_service.list(&auth, &page).await?;

    Ok(Json(ApiResponse::ok(servers)))
}

/// GET /api/servers/mine — every server the caller can reach.
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ServerAccessResponse>>>, ApiError> {
    let rows = state.server_service.list_for_user(&auth).await?;

    Ok(Json(ApiResponse::ok(
        rows.into_iter().map(ServerAccessResponse::from).collect(),
    )))
}

/// PUT /api/servers/{public_id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(public_id): Path<String>,
    Json(req): Json<UpdateServerRequest>,
) -> Result<Json<ApiResponse<ServerResponse>>, ApiError> {
    validate_payload(&req)?;

    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    let data = UpdateServer {
        name: req.name,
        address: req.address,
        port: req.port,
    };
    let server = state.server_service.update(&auth, server_id, &data).await?;

    Ok(Json(ApiResponse::ok(ServerResponse::from(server))))
}

/// DELETE /api/servers/{public_id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(public_id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    state.server_service.delete(&auth, server_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Server deleted"))))
}

/// PUT /api/servers/{public_id}/secret
pub async fn rotate_secret(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(public_id): Path<String>,
    Json(req): Json<RotateSecretRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_payload(&req)?;

    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    let secret_hash = state.password_hasher.hash(&req.secret)?;
    state
        .server_service
        .rotate_secret(&auth, server_id, &secret_hash)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Secret rotated"))))
}

/// GET /api/servers/{public_id}/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(public_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ServerUserResponse>>>, ApiError> {
    let server_id = state.server_service.resolve(&auth, &public_id).await?;
    let rows = state.server_service.list_users(server_id).await?;

    Ok(Json(ApiResponse::ok(
        rows.into_iter().map(ServerUserResponse::from).collect(),
    )))
}
