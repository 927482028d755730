//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use opshub_auth::password::PasswordHasher;
use opshub_auth::token::TokenManager;
use opshub_cache::CacheManager;
use opshub_core::config::AppConfig;
use opshub_service::chronicle::ChronicleService;
use opshub_service::group::GroupService;
use opshub_service::server::ServerService;
use opshub_service::user::UserService;

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Cache / revocation store.
    pub cache: Arc<CacheManager>,

    /// Token lifecycle manager.
    pub token_manager: Arc<TokenManager>,
    /// Password hasher (bcrypt).
    pub password_hasher: Arc<PasswordHasher>,

    /// User identity service.
    pub user_service: Arc<UserService>,
    /// Server management service.
    pub server_service: Arc<ServerService>,
    /// Group and permission service.
    pub group_service: Arc<GroupService>,
    /// Audit trail service.
    pub chronicle_service: Arc<ChronicleService>,

    /// Per-IP rate limiter for auth endpoints.
    pub rate_limiter: Arc<RateLimiter>,
}
