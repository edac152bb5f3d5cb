//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use confessions_types::StoreConnector;

use super::handlers::{self, AppState};
use crate::ConfessionService;

/// HTTP Server for the Confessions API.
pub struct HttpServer<C: StoreConnector> {
    state: Arc<AppState<C>>,
    check_env_enabled: bool,
    cors_origins: Vec<HeaderValue>,
    cors_any_origin: bool,
}

impl<C: StoreConnector> HttpServer<C> {
    /// Creates a new HTTP server with the given service.
    ///
    /// The diagnostic route is enabled and CORS is off by default.
    pub fn new(service: ConfessionService<C>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
            check_env_enabled: true,
            cors_origins: Vec::new(),
            cors_any_origin: false,
        }
    }

    /// Enables or removes `GET /api/check-env`.
    pub fn with_check_env(mut self, enabled: bool) -> Self {
        self.check_env_enabled = enabled;
        self
    }

    /// Allows browser calls from the given origins.
    ///
    /// `*` allows every origin and makes any other entry redundant.
    /// Origins that are not valid header values are skipped with a warning.
    pub fn with_cors_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut any_origin = false;
        self.cors_origins = origins
            .into_iter()
            .filter_map(|origin| {
                let origin = origin.as_ref().trim();
                if origin == "*" {
                    any_origin = true;
                    return None;
                }
                match HeaderValue::from_str(origin) {
                    Ok(value) if !origin.is_empty() => Some(value),
                    Ok(_) => None,
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                        None
                    }
                }
            })
            .collect();
        self.cors_any_origin = any_origin;
        self
    }

    fn cors_layer(&self) -> Option<CorsLayer> {
        // `AllowOrigin::list` panics on `*`, so the wildcard never reaches it.
        let allow_origin = if self.cors_any_origin {
            AllowOrigin::any()
        } else if !self.cors_origins.is_empty() {
            AllowOrigin::list(self.cors_origins.clone())
        } else {
            return None;
        };

        Some(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        let mut router: Router<Arc<AppState<C>>> = Router::new()
            .route("/health", get(handlers::health))
            .route("/api/openapi.json", get(handlers::openapi))
            .route("/api/confess", post(handlers::confess::<C>));

        if self.check_env_enabled {
            router = router.route("/api/check-env", get(handlers::check_env::<C>));
        }

        if let Some(cors) = self.cors_layer() {
            router = router.layer(cors);
        }

        router
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        if self.check_env_enabled {
            tracing::warn!(
                "GET /api/check-env is enabled; set CHECK_ENV_ENABLED=false to hide it in production"
            );
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
