//! # opshub-api
//!
//! HTTP API layer using Axum — routes, middleware, handlers, DTOs, and
//! the server wiring for OpsHub.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::run_server;
pub use state::AppState;
