//! Server group domain entities.

pub mod model;

pub use model::{GroupMembership, GroupPermission, ServerGroup, ServerUser};
