//! GraphQL schema and resolvers for Kinship
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for member types, users, posts and profiles
//! - Mutation resolvers writing straight to the store
//! - Object types whose relations resolve through request-scoped loaders
//! - The per-request [`ExecutionContext`]

pub mod context;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use context::ExecutionContext;
pub use loaders::LoaderRegistry;
pub use schema::{build_schema, KinshipSchema, SchemaBuilder, MAX_QUERY_DEPTH};

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use kinship_shared_config::LoaderConfig;

use crate::error::ApiError;
use crate::store::Store;

/// Convert any API-level failure into a GraphQL error carrying `extensions.code`
pub(crate) fn to_graphql_error(error: impl Into<ApiError>) -> async_graphql::Error {
    error.into().extend()
}

/// Execute one operation with a fresh [`ExecutionContext`]
pub async fn execute(
    schema: &KinshipSchema,
    store: Arc<dyn Store>,
    config: LoaderConfig,
    request: impl Into<async_graphql::Request>,
) -> async_graphql::Response {
    let request = request
        .into()
        .data(ExecutionContext::new(store, config));

    schema.execute(request).await
}
