//! User identity service.

pub mod service;

pub use service::UserService;
