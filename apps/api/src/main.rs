use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kinship_api::config::{Config, StoreBackend};
use kinship_api::graphql::SchemaBuilder;
use kinship_api::routes::app_router;
use kinship_api::store::{MemoryStore, PgStore, Store};

/// CORS for the GraphQL endpoint.
///
/// Explicit `CORS_ORIGINS` always win. Without them development is
/// permissive and production allows no cross-origin callers.
fn build_cors_layer(config: &Config) -> CorsLayer {
    let configured = config.cors_allowed_origins.as_deref().unwrap_or_default();

    if configured.is_empty() {
        if config.is_production() {
            tracing::warn!("CORS_ORIGINS unset in production; cross-origin requests are rejected");
            return CorsLayer::new();
        }
        tracing::warn!("CORS_ORIGINS unset; allowing any origin outside production");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::error!("No valid CORS origins; cross-origin requests are rejected");
        return CorsLayer::new();
    }

    tracing::info!(origins = ?configured, "CORS restricted to configured origins");
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Connect the configured store, running migrations for Postgres
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let database = config.database();
            tracing::info!("Connecting to database...");

            let pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .min_connections(database.min_connections)
                .acquire_timeout(database.acquire_timeout)
                .idle_timeout(database.idle_timeout)
                .connect(&database.url)
                .await?;

            tracing::info!("Database connection established");

            let store = PgStore::new(pool);

            tracing::info!("Running database migrations...");
            store.migrate().await?;
            tracing::info!("Migrations completed successfully");

            Ok(Arc::new(store))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so RUST_LOG from it applies to the subscriber
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kinship_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        environment = %config.environment(),
        store = %config.store_backend,
        "Starting Kinship API server on port {}",
        config.port
    );

    let store = connect_store(&config).await?;

    let mut schema = SchemaBuilder::new();
    if config.is_production() {
        schema = schema.disable_introspection();
    }
    let schema = schema.build();
    tracing::info!("GraphQL schema built");

    let loader_config = config.loader();
    tracing::info!(
        batch_delay_ms = loader_config.batch_delay.as_millis() as u64,
        max_batch_size = loader_config.max_batch_size,
        "Loader configuration"
    );

    let app = app_router(schema, store, loader_config).layer(build_cors_layer(&config));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL Playground available at http://{}:{}/graphql/playground",
        addr.ip(),
        addr.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
