//! Configuration loading from environment.

use std::env;

use confessions_types::{Credentials, RuntimeConfig};

/// Env var: enables `GET /api/check-env` (default `true`).
pub const ENV_CHECK_ENV_ENABLED: &str = "CHECK_ENV_ENABLED";
/// Env var: comma-separated list of origins allowed to call the API.
pub const ENV_CORS_ALLOW_ORIGIN: &str = "CORS_ALLOW_ORIGIN";
/// Env var: OTLP collector; tracing export is off when unset.
pub const ENV_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

/// Application configuration.
///
/// Built once at startup and handed to the service; request handling
/// never reads the process environment.
pub struct Config {
    pub port: u16,
    pub credentials: Credentials,
    pub check_env_enabled: bool,
    pub cors_origins: Vec<String>,
    pub otlp_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()?;

        let runtime = RuntimeConfig::from_lookup(&lookup);
        let credentials = Credentials::resolve(&runtime, &lookup);

        let check_env_enabled = match lookup(ENV_CHECK_ENV_ENABLED) {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                anyhow::anyhow!("{} must be true or false, got {:?}", ENV_CHECK_ENV_ENABLED, raw)
            })?,
            None => true,
        };

        let cors_origins = lookup(ENV_CORS_ALLOW_ORIGIN)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let otlp_enabled = lookup(ENV_OTLP_ENDPOINT).is_some_and(|v| !v.trim().is_empty());

        Ok(Self {
            port,
            credentials,
            check_env_enabled,
            cors_origins,
            otlp_enabled,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
