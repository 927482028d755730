//! Group and permission management service.

pub mod service;

pub use service::GroupService;
