//! # Confessions Repository
//!
//! Concrete store adapters for the confessions service.
//! This crate provides the hosted-database adapter that implements the
//! `StoreConnector` and `ConfessionStore` ports.

pub mod supabase;

mod types;

#[cfg(test)]
mod supabase_tests;

pub use supabase::{CONFESSIONS_TABLE, SupabaseConnector, SupabaseStore};

/// Build the connector used by the server.
///
/// The returned connector owns one pooled HTTP client. Every request still
/// gets its own store session from [`confessions_types::StoreConnector::connect`].
///
/// # Examples
///
/// ```ignore
/// let connector = build_connector()?;
/// let store = connector.connect(&credentials)?;
/// store.insert(confession).await?;
/// ```
pub fn build_connector() -> anyhow::Result<SupabaseConnector> {
    SupabaseConnector::new()
}
