//! Client metadata extractor — origin address and User-Agent.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// Origin address and User-Agent of the current request.
///
/// Available on unauthenticated routes (login, register) where the full
/// [`super::AuthUser`] context does not apply.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client IP — `X-Forwarded-For` when present, else the socket peer.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: String,
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(client_info_from_parts(parts))
    }
}

/// Build client metadata from request parts.
pub(crate) fn client_info_from_parts(parts: &Parts) -> ClientInfo {
    let forwarded = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let ip_address = forwarded.unwrap_or_else(|| {
        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    });

    let user_agent = parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    ClientInfo {
        ip_address,
        user_agent,
    }
}
