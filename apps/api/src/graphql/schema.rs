//! GraphQL schema builder for Kinship

use async_graphql::{EmptySubscription, Schema};

use super::mutation::Mutation;
use super::query::Query;

/// The Kinship GraphQL schema type
pub type KinshipSchema = Schema<Query, Mutation, EmptySubscription>;

/// Deepest selection nesting accepted before execution, counting top-level
/// fields as depth 0
pub const MAX_QUERY_DEPTH: usize = 5;

/// Builder for constructing the GraphQL schema
///
/// The schema carries no services of its own: the store and loaders arrive
/// per request inside an `ExecutionContext`.
pub struct SchemaBuilder {
    max_depth: Option<usize>,
    introspection: bool,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            max_depth: Some(MAX_QUERY_DEPTH),
            introspection: true,
        }
    }

    /// Override the depth limit (top-level fields are depth 0); `None` disables it
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Disable introspection queries (used in production)
    pub fn disable_introspection(mut self) -> Self {
        self.introspection = false;
        self
    }

    pub fn build(self) -> KinshipSchema {
        let mut builder = Schema::build(Query::default(), Mutation::default(), EmptySubscription);

        // async-graphql counts top-level fields as depth 1
        if let Some(max_depth) = self.max_depth {
            builder = builder.limit_depth(max_depth + 1);
        }

        if !self.introspection {
            builder = builder.disable_introspection();
        }

        builder.finish()
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the schema with the default depth limit
pub fn build_schema() -> KinshipSchema {
    SchemaBuilder::new().build()
}
