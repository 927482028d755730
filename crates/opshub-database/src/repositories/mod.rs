//! Concrete repository implementations.

pub mod chronicle;
pub mod group;
pub mod server;
pub mod user;

pub use chronicle::ChronicleRepository;
pub use group::GroupRepository;
pub use server::ServerRepository;
pub use user::UserRepository;
