//! Server management service.

pub mod service;

pub use service::{MANAGE_PERMISSION, ServerService};
