//! Per-operation execution context
//!
//! An [`ExecutionContext`] is built for every incoming GraphQL request and
//! attached with `Request::data`, so the loader caches it carries never outlive
//! the operation.

use std::sync::Arc;

use async_graphql::Context;
use kinship_shared_config::LoaderConfig;

use super::loaders::LoaderRegistry;
use crate::store::Store;

/// Store handle plus a fresh loader registry for one operation
pub struct ExecutionContext {
    store: Arc<dyn Store>,
    loaders: LoaderRegistry,
}

impl ExecutionContext {
    pub fn new(store: Arc<dyn Store>, config: LoaderConfig) -> Self {
        Self {
            loaders: LoaderRegistry::new(store.clone(), config),
            store,
        }
    }

    /// Direct store access, used by mutations which never read through loaders
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn loaders(&self) -> &LoaderRegistry {
        &self.loaders
    }

    /// Fetch the context attached to the current request
    pub fn get<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a ExecutionContext> {
        ctx.data::<ExecutionContext>()
    }
}
