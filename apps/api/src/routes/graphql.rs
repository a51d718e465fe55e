//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - Execute an operation
//! - `GET /graphql/playground` - GraphQL Playground page

use std::sync::Arc;

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::Extension, response::Html, response::IntoResponse};
use kinship_shared_config::LoaderConfig;

use crate::graphql::{self, KinshipSchema};
use crate::store::Store;

/// Execute a GraphQL operation
///
/// Every request gets its own `ExecutionContext`, so loader caches never
/// leak between operations.
pub async fn graphql_handler(
    Extension(schema): Extension<KinshipSchema>,
    Extension(store): Extension<Arc<dyn Store>>,
    Extension(loader_config): Extension<LoaderConfig>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    graphql::execute(&schema, store, loader_config, req.into_inner())
        .await
        .into()
}

/// GraphQL Playground handler for development
pub async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
