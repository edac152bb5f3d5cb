//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::credentials::{Credentials, KeyFormat};
use crate::domain::ConfessionId;

// ─────────────────────────────────────────────────────────────────────────────
// Submission DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /api/confess`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfessRequest {
    /// Free-form confession text
    #[schema(example = "I never returned the library book.")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confession: Option<String>,
}

impl ConfessRequest {
    pub fn new(confession: impl Into<String>) -> Self {
        Self {
            confession: Some(confession.into()),
        }
    }

    /// Reads a request body without ever failing.
    ///
    /// Anything that does not carry a string `confession` field (empty body,
    /// malformed JSON, wrong type) yields a request with no text, which the
    /// service then rejects as a validation error.
    pub fn from_body(body: &[u8]) -> Self {
        let confession = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("confession") {
                Some(serde_json::Value::String(text)) => Some(text.clone()),
                _ => None,
            });
        Self { confession }
    }
}

/// Response after a confession was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfessResponse {
    #[schema(example = true)]
    pub success: bool,
    /// Identifier of the new row, when the store reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "42")]
    pub id: Option<ConfessionId>,
}

impl ConfessResponse {
    pub fn stored(id: Option<ConfessionId>) -> Self {
        Self { success: true, id }
    }
}

/// Error body for every handled failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = "Confession text is required.")]
    pub message: String,
    #[schema(example = 400)]
    pub status_code: u16,
}

// ─────────────────────────────────────────────────────────────────────────────
// Diagnostics DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a credential value is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SetStatus {
    #[serde(rename = "set")]
    Set,
    #[serde(rename = "NOT SET")]
    NotSet,
}

impl SetStatus {
    fn of(present: bool) -> Self {
        if present { SetStatus::Set } else { SetStatus::NotSet }
    }
}

/// Body of `GET /api/check-env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    pub supabase_url: SetStatus,
    #[schema(example = 40)]
    pub supabase_url_length: usize,
    pub supabase_anon_key: SetStatus,
    #[schema(example = "eyJhbGciOiJIUzI... (length 208)")]
    pub key_preview: String,
    #[schema(example = "Using JWT (anon) key.")]
    pub hint: String,
}

pub const HINT_MISSING: &str =
    "Add SUPABASE_URL and SUPABASE_ANON_KEY to the server environment, then restart.";
pub const HINT_JWT: &str = "Using JWT (anon) key.";
pub const HINT_PUBLISHABLE: &str = "Using publishable/secret key format.";
pub const HINT_UNRECOGNIZED: &str =
    "Key should start with eyJ (anon) or sb_ (publishable). Check you copied the full key.";

const KEY_PREVIEW_CHARS: usize = 15;

impl EnvReport {
    /// Describes the credential pair without revealing the key.
    pub fn describe(credentials: &Credentials) -> Self {
        let key = credentials.key();

        let key_preview = if credentials.has_key() {
            let head: String = key.chars().take(KEY_PREVIEW_CHARS).collect();
            format!("{}... (length {})", head, key.chars().count())
        } else {
            "not set".to_string()
        };

        let hint = if !credentials.is_complete() {
            HINT_MISSING
        } else {
            match credentials.key_format() {
                KeyFormat::Jwt => HINT_JWT,
                KeyFormat::Publishable => HINT_PUBLISHABLE,
                KeyFormat::Unrecognized => HINT_UNRECOGNIZED,
            }
        };

        Self {
            supabase_url: SetStatus::of(credentials.has_url()),
            supabase_url_length: credentials.url().chars().count(),
            supabase_anon_key: SetStatus::of(credentials.has_key()),
            key_preview,
            hint: hint.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_reads_confession() {
        let req = ConfessRequest::from_body(br#"{"confession": "hello"}"#);
        assert_eq!(req.confession.as_deref(), Some("hello"));
    }

    #[test]
    fn test_from_body_is_lenient() {
        for body in [&b""[..], b"not json", b"[1,2]", br#"{"confession": 5}"#, br#"{}"#] {
            assert_eq!(ConfessRequest::from_body(body).confession, None);
        }
    }

    #[test]
    fn test_response_omits_missing_id() {
        let json = serde_json::to_value(ConfessResponse::stored(None)).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));

        let stored = ConfessResponse::stored(Some(ConfessionId::Int(9)));
        let json = serde_json::to_value(stored).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "id": 9 }));
    }

    #[test]
    fn test_env_report_jwt_key() {
        let url = "https://abcdefgh.supabase.co/x"; // 30 chars
        assert_eq!(url.len(), 30);
        let creds = Credentials::new(url, "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9");
        let report = EnvReport::describe(&creds);

        assert_eq!(report.supabase_url, SetStatus::Set);
        assert_eq!(report.supabase_url_length, 30);
        assert_eq!(report.supabase_anon_key, SetStatus::Set);
        assert_eq!(report.key_preview, "eyJhbGciOiJIUzI... (length 36)");
        assert!(report.hint.contains("JWT"));
    }

    #[test]
    fn test_env_report_serialized_field_names() {
        let report = EnvReport::describe(&Credentials::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "supabaseUrl": "NOT SET",
                "supabaseUrlLength": 0,
                "supabaseAnonKey": "NOT SET",
                "keyPreview": "not set",
                "hint": HINT_MISSING,
            })
        );
    }

    #[test]
    fn test_env_report_hints() {
        let url = "https://x.supabase.co";
        assert_eq!(
            EnvReport::describe(&Credentials::new(url, "sb_publishable_123")).hint,
            HINT_PUBLISHABLE
        );
        assert_eq!(
            EnvReport::describe(&Credentials::new(url, "whatever")).hint,
            HINT_UNRECOGNIZED
        );
        assert_eq!(EnvReport::describe(&Credentials::new("", "eyJ")).hint, HINT_MISSING);
        assert_eq!(EnvReport::describe(&Credentials::new(url, "")).hint, HINT_MISSING);
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse {
            message: "Confession text is required.".into(),
            status_code: 400,
        };
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["message"], "Confession text is required.");
        assert_eq!(json["statusCode"], 400);
    }
}
