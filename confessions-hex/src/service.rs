//! Confession Application Service
//!
//! Orchestrates a submission through the store port.
//! Contains NO infrastructure logic - pure orchestration.

use confessions_types::{
    AppError, ConfessRequest, ConfessResponse, ConfessionStore, ConfessionText, Credentials,
    EnvReport, NewConfession, StoreConnector,
};

/// Application service for confession submissions.
///
/// Holds the credential pair resolved once at startup. Each submission
/// opens its own store session through the injected connector, so
/// requests share no mutable state.
pub struct ConfessionService<C: StoreConnector> {
    connector: C,
    credentials: Credentials,
}

impl<C: StoreConnector> ConfessionService<C> {
    /// Creates a new service with the given connector and credentials.
    pub fn new(connector: C, credentials: Credentials) -> Self {
        Self {
            connector,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Validates and stores one confession.
    ///
    /// Checks run in a fixed order: credentials (500), then text (400).
    /// The remote store is only contacted when both pass, and exactly one
    /// insert is attempted. Failures are never retried.
    #[tracing::instrument(skip(self, req))]
    pub async fn submit(&self, req: ConfessRequest) -> Result<ConfessResponse, AppError> {
        if !self.credentials.is_complete() {
            tracing::error!(
                url_set = self.credentials.has_url(),
                key_set = self.credentials.has_key(),
                "Rejecting submission: store credentials are not configured"
            );
            return Err(AppError::missing_credentials());
        }

        let text = ConfessionText::parse(req.confession.as_deref().unwrap_or_default())?;

        let store = self.connector.connect(&self.credentials)?;
        let inserted = store.insert(NewConfession::new(text)).await.map_err(|e| {
            tracing::warn!(error = %e, "Confession insert failed");
            AppError::from(e)
        })?;

        tracing::info!(id = ?inserted.id, "Confession accepted");
        Ok(ConfessResponse::stored(inserted.id))
    }

    /// Reports which credentials are configured. Never contacts the store.
    pub fn check_env(&self) -> EnvReport {
        EnvReport::describe(&self.credentials)
    }
}
