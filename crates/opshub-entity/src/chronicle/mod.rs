//! User chronicle (audit trail) entities.

pub mod model;

pub use model::{ChronicleEntry, CreateChronicleEntry};
