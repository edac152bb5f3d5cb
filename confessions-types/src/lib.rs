//! # Confessions Types
//!
//! Domain types and port traits for the confession submission service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, credential resolution and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (ConfessionText, NewConfession)
//! - `credentials` - Credential pair and the layered resolver
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, repository and application error types

pub mod credentials;
pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use credentials::{Credentials, KeyFormat, RuntimeConfig};
pub use domain::{ConfessionId, ConfessionText, InsertedConfession, NewConfession};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{ConfessionStore, StoreConnector};
