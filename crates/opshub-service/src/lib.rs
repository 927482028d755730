//! # opshub-service
//!
//! Business logic service layer for OpsHub. Each service orchestrates
//! repositories, the credential components, and the chronicle to
//! implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references; there are no process-wide
//! singletons.

pub mod chronicle;
pub mod context;
pub mod group;
pub mod server;
pub mod user;

pub use chronicle::ChronicleService;
pub use context::RequestContext;
pub use group::GroupService;
pub use server::ServerService;
pub use user::UserService;
