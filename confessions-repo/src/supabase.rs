//! Supabase (PostgREST) store adapter.

use async_trait::async_trait;
use reqwest::{Client, Url};

use confessions_types::{
    ConfessionStore, Credentials, InsertedConfession, NewConfession, RepoError, StoreConnector,
};

use crate::types::{ErrorBody, InsertRow, ReturnedRow};

/// Table that receives confession rows.
pub const CONFESSIONS_TABLE: &str = "confessions";

const REST_PATH: &str = "rest/v1/";

// ─────────────────────────────────────────────────────────────────────────────
// Connector
// ─────────────────────────────────────────────────────────────────────────────

/// Opens one [`SupabaseStore`] per request.
///
/// The underlying `reqwest::Client` is a thread-safe connection pool and is
/// shared between the stores this connector hands out.
#[derive(Clone)]
pub struct SupabaseConnector {
    http: Client,
}

impl SupabaseConnector {
    pub fn new() -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("confessions/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http))
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

impl StoreConnector for SupabaseConnector {
    type Store = SupabaseStore;

    fn connect(&self, credentials: &Credentials) -> Result<SupabaseStore, RepoError> {
        SupabaseStore::open(self.http.clone(), credentials)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// A client session bound to one project URL and API key.
pub struct SupabaseStore {
    http: Client,
    endpoint: Url,
    key: String,
}

impl SupabaseStore {
    /// Validates the project URL and derives the table endpoint from it.
    pub fn open(http: Client, credentials: &Credentials) -> Result<Self, RepoError> {
        let endpoint = table_endpoint(credentials.url(), CONFESSIONS_TABLE)?;
        Ok(Self {
            http,
            endpoint,
            key: credentials.key().to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `https://<project>.supabase.co` → `https://<project>.supabase.co/rest/v1/<table>`
fn table_endpoint(project_url: &str, table: &str) -> Result<Url, RepoError> {
    let mut base = project_url.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let base = Url::parse(&base).map_err(|e| RepoError::InvalidEndpoint(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(RepoError::InvalidEndpoint(format!(
            "Must be a valid HTTP or HTTPS URL, got scheme `{}`",
            base.scheme()
        )));
    }

    base.join(REST_PATH)
        .and_then(|rest| rest.join(table))
        .map_err(|e| RepoError::InvalidEndpoint(e.to_string()))
}

#[async_trait]
impl ConfessionStore for SupabaseStore {
    #[tracing::instrument(skip_all)]
    async fn insert(&self, confession: NewConfession) -> Result<InsertedConfession, RepoError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            len = confession.text.len(),
            "Inserting confession"
        );
        let row = InsertRow::from(&confession);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| RepoError::Transport(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let raw = response.bytes().await.unwrap_or_default();
            let message = ErrorBody::message_from(&raw);
            tracing::warn!(%status, %message, "Insert rejected by remote store");
            return Err(RepoError::Rejected(message));
        }

        // The row is written at this point. A representation we cannot read
        // only costs us the identifier.
        let id = match response.bytes().await {
            Ok(raw) => serde_json::from_slice::<Vec<ReturnedRow>>(&raw)
                .ok()
                .and_then(|rows| rows.into_iter().next())
                .and_then(|row| row.id),
            Err(e) => {
                tracing::debug!(error = %e, "Could not read insert representation");
                None
            }
        };

        tracing::debug!(%status, id = ?id, "Confession stored");
        Ok(InsertedConfession { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_endpoint_from_project_url() {
        let url = table_endpoint("https://abc.supabase.co", "confessions").unwrap();
        assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/confessions");

        let url = table_endpoint("https://abc.supabase.co/", "confessions").unwrap();
        assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/confessions");
    }

    #[test]
    fn test_table_endpoint_keeps_base_path() {
        let url = table_endpoint("http://127.0.0.1:54321/project", "confessions").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:54321/project/rest/v1/confessions");
    }

    #[test]
    fn test_table_endpoint_rejects_bad_urls() {
        assert!(matches!(
            table_endpoint("abc.supabase.co", "confessions"),
            Err(RepoError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            table_endpoint("ftp://abc.supabase.co", "confessions"),
            Err(RepoError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_connect_validates_credentials_url() {
        let connector = SupabaseConnector::with_client(Client::new());
        let result = connector.connect(&Credentials::new("not a url", "eyJkey"));
        assert!(matches!(result, Err(RepoError::InvalidEndpoint(_))));
    }
}
