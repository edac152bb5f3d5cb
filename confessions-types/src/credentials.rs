//! Credential pair for the hosted database and the layered resolver
//! that produces it.
//!
//! Resolution order (first non-empty raw value wins, then it is trimmed):
//!
//! | Value | Sources |
//! |-------|---------|
//! | URL   | runtime `public_url` → `SUPABASE_URL` |
//! | Key   | runtime `public_key` → `SUPABASE_ANON_KEY` → `SUPABASE_KEY` |
//!
//! Absence is never an error here. An unset value resolves to an empty
//! string and callers check [`Credentials::is_complete`].

/// Env var: framework-namespaced public URL (runtime config layer).
pub const ENV_PUBLIC_URL: &str = "NUXT_PUBLIC_SUPABASE_URL";
/// Env var: framework-namespaced public key (runtime config layer).
pub const ENV_PUBLIC_KEY: &str = "NUXT_PUBLIC_SUPABASE_ANON_KEY";
/// Env var: primary database URL.
pub const ENV_URL: &str = "SUPABASE_URL";
/// Env var: primary anon key.
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
/// Env var: legacy key name.
pub const ENV_LEGACY_KEY: &str = "SUPABASE_KEY";

/// Process-env fallbacks for the URL, in precedence order.
pub const URL_FALLBACKS: &[&str] = &[ENV_URL];
/// Process-env fallbacks for the key, in precedence order.
pub const KEY_FALLBACKS: &[&str] = &[ENV_ANON_KEY, ENV_LEGACY_KEY];

/// Values supplied by the runtime configuration layer.
///
/// These take precedence over the raw process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub public_url: Option<String>,
    pub public_key: Option<String>,
}

impl RuntimeConfig {
    /// Reads the framework-namespaced variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            public_url: lookup(ENV_PUBLIC_URL),
            public_key: lookup(ENV_PUBLIC_KEY),
        }
    }
}

/// Endpoint URL and API key needed to reach the hosted database.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    url: String,
    key: String,
}

impl Credentials {
    /// Creates a credential pair, trimming both values.
    pub fn new(url: impl AsRef<str>, key: impl AsRef<str>) -> Self {
        Self {
            url: url.as_ref().trim().to_string(),
            key: key.as_ref().trim().to_string(),
        }
    }

    /// Resolves credentials from the runtime config first, then from the
    /// process environment via `lookup`.
    pub fn resolve<F>(runtime: &RuntimeConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = first_present(runtime.public_url.as_deref(), URL_FALLBACKS, &lookup);
        let key = first_present(runtime.public_key.as_deref(), KEY_FALLBACKS, &lookup);
        Self::new(url, key)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    /// Both values are present.
    pub fn is_complete(&self) -> bool {
        self.has_url() && self.has_key()
    }

    pub fn key_format(&self) -> KeyFormat {
        KeyFormat::classify(&self.key)
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &if self.has_key() { "<redacted>" } else { "" })
            .finish()
    }
}

/// An empty raw value falls through to the next source. A whitespace-only
/// one does not: it is selected and later trims to empty.
fn first_present<F>(runtime: Option<&str>, fallbacks: &[&str], lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = runtime.filter(|v| !v.is_empty()) {
        return value.to_string();
    }

    fallbacks
        .iter()
        .filter_map(|name| lookup(name))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Shape of the configured API key, judged by its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// Legacy JWT anon/service key (`eyJ...`).
    Jwt,
    /// Publishable or secret key (`sb_...`).
    Publishable,
    Unrecognized,
}

impl KeyFormat {
    pub const JWT_PREFIX: &'static str = "eyJ";
    pub const PUBLISHABLE_PREFIX: &'static str = "sb_";

    pub fn classify(key: &str) -> Self {
        if key.starts_with(Self::JWT_PREFIX) {
            KeyFormat::Jwt
        } else if key.starts_with(Self::PUBLISHABLE_PREFIX) {
            KeyFormat::Publishable
        } else {
            KeyFormat::Unrecognized
        }
    }
}
