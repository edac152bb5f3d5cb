//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use confessions_types::dto::{ConfessRequest, ConfessResponse, EnvReport, ErrorResponse, SetStatus};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Submit a confession
#[utoipa::path(
    post,
    path = "/api/confess",
    tag = "confessions",
    request_body = ConfessRequest,
    responses(
        (status = 200, description = "Confession stored", body = ConfessResponse),
        (status = 400, description = "Text missing or blank, or the store rejected the insert", body = ErrorResponse),
        (status = 500, description = "Store credentials are not configured", body = ErrorResponse)
    )
)]
async fn confess() {}

/// Report credential configuration
#[utoipa::path(
    get,
    path = "/api/check-env",
    tag = "diagnostics",
    responses(
        (status = 200, description = "Which credentials are set, with a hint about the key format", body = EnvReport)
    )
)]
async fn check_env() {}

/// OpenAPI documentation for the Confessions API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Confessions API",
        version = "1.0.0",
        description = "Accepts short anonymous confessions and stores them in a hosted Supabase table.\n\n`GET /api/check-env` is a diagnostic route. Disable it with `CHECK_ENV_ENABLED=false` on public deployments.",
        license(name = "MIT"),
    ),
    paths(health, confess, check_env),
    components(schemas(ConfessRequest, ConfessResponse, ErrorResponse, EnvReport, SetStatus)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "confessions", description = "Confession submission"),
        (name = "diagnostics", description = "Deployment diagnostics"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert!(paths.contains(&"/api/confess"));
        assert!(paths.contains(&"/api/check-env"));
        assert!(paths.contains(&"/health"));
    }
}
