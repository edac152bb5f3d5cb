//! # Confessions Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize logging (and OTLP export when configured)
//! - Build the store connector
//! - Create the confession service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{
    metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use confessions_hex::{ConfessionService, inbound::HttpServer};
use confessions_repo::build_connector;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("confessions-service"), provider))
}

/// Installs the global meter provider read by the HTTP metrics layer.
///
/// Must run before the router is built.
fn init_meter() -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .build()?;

    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing and metrics only when a collector is configured
    let otel = if config.otlp_enabled {
        Some(init_tracer()?)
    } else {
        None
    };
    let meter_provider = if config.otlp_enabled {
        Some(init_meter()?)
    } else {
        None
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,confessions_app=debug,confessions_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting confessions server on port {}", config.port);

    if config.credentials.is_complete() {
        tracing::info!(
            "Using store at {} ({:?} key)",
            config.credentials.url(),
            config.credentials.key_format()
        );
    } else {
        tracing::warn!(
            url_set = config.credentials.has_url(),
            key_set = config.credentials.has_key(),
            "Store credentials incomplete; submissions will fail with 500 until SUPABASE_URL and SUPABASE_ANON_KEY are set"
        );
    }

    // Build the store connector (one shared HTTP pool, one session per request)
    let connector = build_connector()?;

    // Create the confession service
    let service = ConfessionService::new(connector, config.credentials);

    // Create and run the HTTP server
    let server = HttpServer::new(service)
        .with_check_env(config.check_env_enabled)
        .with_cors_origins(&config.cors_origins);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces and metrics are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    if let Some(provider) = meter_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
