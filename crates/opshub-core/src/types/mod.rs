//! Shared value types used across the OpsHub crates.

pub mod ident;
pub mod pagination;
pub mod slug;

pub use ident::public_id;
pub use slug::slugify;
