//! Wire types for the PostgREST insert call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use confessions_types::{ConfessionId, NewConfession};

/// Row body sent to `POST /rest/v1/<table>`.
#[derive(Debug, Serialize)]
pub struct InsertRow<'a> {
    pub confession: &'a str,
    pub created_at: String,
}

impl<'a> From<&'a NewConfession> for InsertRow<'a> {
    fn from(confession: &'a NewConfession) -> Self {
        Self {
            confession: confession.text.as_str(),
            created_at: confession.created_at_iso(),
        }
    }
}

/// Row echoed back with `Prefer: return=representation`.
///
/// Only the identifier is of interest; other columns are ignored.
#[derive(Debug, Deserialize)]
pub struct ReturnedRow {
    #[serde(default)]
    pub id: Option<ConfessionId>,
}

/// Error payload returned by PostgREST and the API gateway in front of it.
///
/// Fields are kept loose: gateways sometimes send `error` as an object, and
/// that must not hide a usable `message`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Value,
    #[serde(default)]
    pub error_description: Value,
    #[serde(default)]
    pub error: Value,
}

impl ErrorBody {
    /// Best message found in a raw error body. Empty when there is none.
    pub fn message_from(raw: &[u8]) -> String {
        let body: ErrorBody = serde_json::from_slice(raw).unwrap_or_default();
        [body.message, body.error_description, body.error]
            .iter()
            .filter_map(Value::as_str)
            .find(|m| !m.trim().is_empty())
            .map(str::to_owned)
            .unwrap_or_default()
    }
}
