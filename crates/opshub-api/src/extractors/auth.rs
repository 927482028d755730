//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and resolves the subject to an internal user id.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use opshub_core::error::AppError;
use opshub_service::context::RequestContext;

use crate::error::ApiError;
use crate::extractors::client::client_info_from_parts;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;

        // Signature, expiry, and token class.
        let claims = state.token_manager.verify_access(token)?;

        // The subject must still resolve to a live account.
        let user = state
            .user_service
            .resolve_public_id(&claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unknown token subject"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("Account is deactivated").into());
        }

        let client = client_info_from_parts(parts);

        Ok(AuthUser(RequestContext::new(
            user.id,
            user.public_id,
            user.is_admin,
            client.ip_address,
            client.user_agent,
        )))
    }
}
