//! # opshub-entity
//!
//! Domain entity models for OpsHub. Every struct in this crate represents
//! a database table row, a creation payload, or a query projection. All
//! entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.

pub mod chronicle;
pub mod group;
pub mod server;
pub mod user;
