//! Confession domain model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier assigned by the remote store to an inserted row.
///
/// Hosted tables use either an identity column or a UUID/text key,
/// so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfessionId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for ConfessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfessionId::Int(id) => write!(f, "{}", id),
            ConfessionId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// Confession text that has been trimmed and checked to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfessionText(String);

impl ConfessionText {
    /// Trims the raw input and rejects it if nothing is left.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyConfession);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ConfessionText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfessionText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A confession about to be written to the remote store.
///
/// Rows are append-only: nothing in this service updates, deletes or
/// reads them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConfession {
    pub text: ConfessionText,
    pub created_at: DateTime<Utc>,
}

impl NewConfession {
    /// Stamps the confession with the current server time.
    pub fn new(text: ConfessionText) -> Self {
        Self::at(text, Utc::now())
    }

    /// Creates a confession with an explicit timestamp.
    pub fn at(text: ConfessionText, created_at: DateTime<Utc>) -> Self {
        Self { text, created_at }
    }

    /// ISO-8601 timestamp in UTC with millisecond precision, e.g.
    /// `2024-04-03T10:15:30.123Z`.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// What the store reports back after a successful insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertedConfession {
    pub id: Option<ConfessionId>,
}
