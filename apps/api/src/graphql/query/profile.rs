//! Profile queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::Profile;

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let store = ExecutionContext::get(ctx)?.store();
        let profiles = store.list_profiles().await.map_err(to_graphql_error)?;

        Ok(profiles.into_iter().map(Profile::from).collect())
    }

    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let profile = loaders.profiles.load(id).await.map_err(to_graphql_error)?;

        Ok(profile.map(Profile::from))
    }
}
