//! Route definitions for the OpsHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(user_routes())
        .merge(server_routes())
        .merge(group_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh. Rate limited per client IP.
fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
}

/// User self-service endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::profile))
        .route("/users/me", delete(handlers::user::delete))
        .route("/users/me/name", put(handlers::user::change_name))
        .route("/users/me/email", put(handlers::user::change_email))
        .route("/users/me/password", put(handlers::user::change_password))
}

/// Server CRUD and listings.
fn server_routes() -> Router<AppState> {
    Router::new()
        .route("/servers", get(handlers::server::list))
        .route("/servers", post(handlers::server::create))
        .route("/servers/mine", get(handlers::server::list_mine))
        .route("/servers/{public_id}", put(handlers::server::update))
        .route("/servers/{public_id}", delete(handlers::server::delete))
        .route(
            "/servers/{public_id}/secret",
            put(handlers::server::rotate_secret),
        )
        .route(
            "/servers/{public_id}/users",
            get(handlers::server::list_users),
        )
}

/// Group, permission, and membership management.
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/servers/{public_id}/groups", get(handlers::group::list))
        .route("/servers/{public_id}/groups", post(handlers::group::create))
        .route(
            "/servers/{public_id}/groups/{slug}",
            put(handlers::group::rename),
        )
        .route(
            "/servers/{public_id}/groups/{slug}",
            delete(handlers::group::delete),
        )
        .route(
            "/servers/{public_id}/groups/{slug}/permissions",
            get(handlers::group::list_permissions),
        )
        .route(
            "/servers/{public_id}/groups/{slug}/permissions",
            post(handlers::group::grant_permission),
        )
        .route(
            "/servers/{public_id}/groups/{slug}/permissions/{permission_id}",
            delete(handlers::group::revoke_permission),
        )
        .route(
            "/servers/{public_id}/groups/{slug}/members",
            post(handlers::group::add_member),
        )
        .route(
            "/servers/{public_id}/groups/{slug}/members/{membership_id}",
            delete(handlers::group::remove_member),
        )
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
