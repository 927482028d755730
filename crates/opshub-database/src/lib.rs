//! # opshub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all OpsHub entities.
//!
//! Unique-constraint violations are translated to conflict errors here:
//! the store is the authoritative arbiter for every uniqueness invariant,
//! and any in-code existence check upstream is a fast path only.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
