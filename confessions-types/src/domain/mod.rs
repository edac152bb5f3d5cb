//! Domain models for the confession service.

pub mod confession;

pub use confession::{ConfessionId, ConfessionText, InsertedConfession, NewConfession};
