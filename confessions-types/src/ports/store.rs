//! Remote store ports.
//!
//! The hosted database is reached through a short-lived client that is
//! opened per request from the resolved credentials. `StoreConnector`
//! opens it, `ConfessionStore` performs the write.

use crate::credentials::Credentials;
use crate::domain::{InsertedConfession, NewConfession};
use crate::error::RepoError;

/// A client session against the remote confessions table.
#[async_trait::async_trait]
pub trait ConfessionStore: Send + Sync {
    /// Inserts exactly one row. Nothing is written when this fails.
    async fn insert(&self, confession: NewConfession) -> Result<InsertedConfession, RepoError>;
}

/// Opens a [`ConfessionStore`] for a credential pair.
///
/// Implementations may share a thread-safe connection pool between the
/// stores they hand out, but each call yields an independent session.
pub trait StoreConnector: Send + Sync + 'static {
    type Store: ConfessionStore + 'static;

    fn connect(&self, credentials: &Credentials) -> Result<Self::Store, RepoError>;
}
