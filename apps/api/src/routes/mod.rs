//! HTTP route handlers for the Kinship API
//!
//! This module contains the endpoint handlers and the router that ties them
//! together:
//! - GraphQL execution and playground
//! - Health check and readiness endpoints

pub mod graphql;
pub mod health;

pub use graphql::{graphql_handler, graphql_playground};
pub use health::{health_router, HealthState};

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use kinship_shared_config::LoaderConfig;
use tower_http::trace::TraceLayer;

use crate::graphql::KinshipSchema;
use crate::store::Store;

/// Build the application router (without CORS, which depends on deployment)
pub fn app_router(
    schema: KinshipSchema,
    store: Arc<dyn Store>,
    loader_config: LoaderConfig,
) -> Router {
    Router::new()
        .route("/", get(root))
        // GraphQL endpoints
        .route("/graphql", post(graphql_handler))
        .route("/graphql/playground", get(graphql_playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(HealthState::new(store.clone())))
        .layer(Extension(schema))
        .layer(Extension(store))
        .layer(Extension(loader_config))
        .layer(TraceLayer::new_for_http())
}

async fn root() -> &'static str {
    "Kinship GraphQL API"
}
