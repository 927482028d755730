//! # opshub-cache
//!
//! Cache and revocation-store providers for OpsHub: a Redis backend for
//! deployment and an in-memory backend for tests and single-node
//! development. Both implement [`opshub_core::traits::CacheProvider`].

pub mod keys;
pub mod memory;
pub mod provider;
pub mod redis;

pub use provider::CacheManager;
