//! Server domain entities.

pub mod model;

pub use model::{CreateServer, Server, ServerAccess, ServerSummary, UpdateServer};
