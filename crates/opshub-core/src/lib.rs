//! # opshub-core
//!
//! Core crate for OpsHub. Contains configuration schemas, shared types
//! (pagination, public identifiers, slugs), the cache provider trait,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other OpsHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
