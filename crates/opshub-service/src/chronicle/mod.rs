//! Chronicle (audit trail) service.

pub mod service;

pub use service::{ChronicleService, event};
