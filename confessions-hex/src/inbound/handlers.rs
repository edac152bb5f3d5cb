//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa::OpenApi;

use confessions_types::{AppError, ConfessRequest, ErrorResponse, StoreConnector};

use crate::ConfessionService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<C: StoreConnector> {
    pub service: ConfessionService<C>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = ErrorResponse {
            message: self.0.message().to_string(),
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Submit a confession.
///
/// The body is read raw so that the credential check runs before any
/// judgement about its contents.
#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn confess<C: StoreConnector>(
    State(state): State<Arc<AppState<C>>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req = ConfessRequest::from_body(&body);
    let response = state.service.submit(req).await?;
    Ok(Json(response))
}

/// Report whether store credentials are configured.
#[tracing::instrument(skip(state))]
pub async fn check_env<C: StoreConnector>(
    State(state): State<Arc<AppState<C>>>,
) -> impl IntoResponse {
    Json(state.service.check_env())
}
