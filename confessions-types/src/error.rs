//! Error types for the confession service.

/// Message returned when the remote store fails without saying why.
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to save confession.";

/// Message returned when the credential pair is incomplete.
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Supabase credentials not set. Add SUPABASE_URL and SUPABASE_ANON_KEY to the server environment, then restart.";

/// Domain-level errors (validation rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Confession text is required.")]
    EmptyConfession,
}

/// Repository-level errors (remote store failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The configured endpoint cannot be used to build a client.
    #[error("Invalid SUPABASE_URL: {0}")]
    InvalidEndpoint(String),

    /// The store answered with an error. The message may be empty.
    #[error("{0}")]
    Rejected(String),

    /// The request never got a usable answer.
    #[error("{0}")]
    Transport(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    /// The credential pair is incomplete.
    pub fn missing_credentials() -> Self {
        AppError::Configuration(MISSING_CREDENTIALS_MESSAGE.into())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Configuration(_) => 500,
            AppError::Validation(_) => 400,
            AppError::Upstream(_) => 400,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Configuration(msg) | AppError::Validation(msg) | AppError::Upstream(msg) => {
                msg
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::InvalidEndpoint(_) => AppError::Configuration(err.to_string()),
            RepoError::Rejected(msg) | RepoError::Transport(msg) => {
                if msg.trim().is_empty() {
                    AppError::Upstream(UPSTREAM_FALLBACK_MESSAGE.into())
                } else {
                    AppError::Upstream(msg)
                }
            }
        }
    }
}
