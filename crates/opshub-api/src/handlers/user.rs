//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{ChangeEmailRequest, ChangeNameRequest, ChangePasswordRequest};
use crate::dto::response::{ApiResponse, MessageResponse, ProfileResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::handlers::validate_payload;
use crate::state::AppState;

/// GET /api/users/me
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let user = state.user_service.profile(auth.user_id).await?;

    Ok(Json(ApiResponse::ok(ProfileResponse::from(user))))
}

/// DELETE /api/users/me
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.user_service.delete(&auth).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Account deleted"))))
}

/// PUT /api/users/me/name
pub async fn change_name(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangeNameRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_payload(&req)?;

    state.user_service.change_name(&auth, &req.name).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Name changed"))))
}

/// PUT /api/users/me/email
pub async fn change_email(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangeEmailRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_payload(&req)?;

    state.user_service.change_email(&auth, &req.email).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("Email changed"))))
}

/// PUT /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_payload(&req)?;

    state
        .user_service
        .change_password(&auth, &req.password, &req.new_password)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Password changed",
    ))))
}
