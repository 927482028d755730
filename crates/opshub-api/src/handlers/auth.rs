//! Auth handlers — register, login, token refresh.

use axum::Json;
use axum::extract::State;
use rand::RngExt;

use opshub_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, TokenPairResponse};
use crate::error::ApiError;
use crate::extractors::ClientInfo;
use crate::handlers::validate_payload;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate_payload(&req)?;

    state
        .user_service
        .register(
            &req.name,
            &req.email,
            &req.password,
            &client.ip_address,
            &client.user_agent,
        )
        .await?;

    response_delay(&state).await;

    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Account created",
    ))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    validate_payload(&req)?;

    let subject = state
        .user_service
        .authenticate(
            &req.name,
            &req.password,
            &client.ip_address,
            &client.user_agent,
        )
        .await?;

    // Uniform delay on both outcomes, so response timing does not reveal
    // whether the account exists or the password was wrong.
    response_delay(&state).await;

    let subject = subject.ok_or_else(|| AppError::unauthorized("Bad credentials"))?;
    let pair = state.token_manager.issue_pair(&subject).await?;

    Ok(Json(ApiResponse::ok(token_pair_response(pair))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    let pair = state.token_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(token_pair_response(pair))))
}

/// Shape a token pair for the wire.
fn token_pair_response(pair: opshub_auth::token::TokenPair) -> TokenPairResponse {
    TokenPairResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "bearer".to_string(),
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    }
}

/// Sleep a uniformly random interval up to the configured bound.
async fn response_delay(state: &AppState) {
    let max_ms = state.config.auth.login_delay_max_ms;
    if max_ms == 0 {
        return;
    }

    let ms = rand::rng().random_range(0..=max_ms);
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
