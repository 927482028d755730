//! Application wiring — builds every component from configuration and
//! runs the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use opshub_auth::password::{PasswordHasher, PasswordPolicy};
use opshub_auth::token::TokenManager;
use opshub_cache::CacheManager;
use opshub_core::config::AppConfig;
use opshub_core::error::AppError;
use opshub_database::repositories::chronicle::ChronicleRepository;
use opshub_database::repositories::group::GroupRepository;
use opshub_database::repositories::server::ServerRepository;
use opshub_database::repositories::user::UserRepository;
use opshub_service::chronicle::ChronicleService;
use opshub_service::group::GroupService;
use opshub_service::server::ServerService;
use opshub_service::user::UserService;

use crate::middleware::rate_limit::RateLimiter;
use crate::router::build_router;
use crate::state::AppState;

/// Runs the OpsHub server with the given configuration.
///
/// Any failure here is a startup-phase failure and bubbles up to the
/// binary, which terminates the process. Once serving, per-request store
/// errors are captured per request and never crash the process.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting OpsHub server...");

    // ── Step 1: Database connection + migrations ─────────────────
    let db = opshub_database::DatabasePool::connect(&config.database).await?;
    opshub_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 2: Cache / revocation store ─────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 3: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let server_repo = Arc::new(ServerRepository::new(db_pool.clone()));
    let group_repo = Arc::new(GroupRepository::new(db_pool.clone()));
    let chronicle_repo = Arc::new(ChronicleRepository::new(db_pool.clone()));

    // ── Step 4: Credential and token components ──────────────────
    let password_hasher = Arc::new(PasswordHasher::new(config.auth.bcrypt_cost));
    let password_policy = PasswordPolicy::new(&config.auth);
    let token_manager = Arc::new(TokenManager::new(&config.auth, Arc::clone(&cache))?);

    // ── Step 5: Services ─────────────────────────────────────────
    let chronicle_service = Arc::new(ChronicleService::new(Arc::clone(&chronicle_repo)));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        password_policy,
        Arc::clone(&chronicle_service),
    ));
    let server_service = Arc::new(ServerService::new(
        Arc::clone(&server_repo),
        Arc::clone(&group_repo),
        Arc::clone(&chronicle_service),
        config.auth.max_servers_per_user,
    ));
    let group_service = Arc::new(GroupService::new(Arc::clone(&group_repo)));

    // ── Step 6: HTTP state and router ────────────────────────────
    let rate_limiter = Arc::new(RateLimiter::new(&config.server.rate_limit));

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool,
        cache,
        token_manager,
        password_hasher,
        user_service,
        server_service,
        group_service,
        chronicle_service,
        rate_limiter,
    };

    let app = build_router(state);

    // ── Step 7: Serve ────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("OpsHub server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
