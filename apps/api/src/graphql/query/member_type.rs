//! Member type queries

use async_graphql::{Context, Object, Result};

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::{MemberType, MemberTypeId};

#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    /// Every member type
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberType>> {
        let store = ExecutionContext::get(ctx)?.store();
        let member_types = store.list_member_types().await.map_err(to_graphql_error)?;

        Ok(member_types.into_iter().map(MemberType::from).collect())
    }

    /// A single member type, null if unknown
    async fn member_type(&self, ctx: &Context<'_>, id: MemberTypeId) -> Result<Option<MemberType>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let member_type = loaders
            .member_types
            .load(id.into())
            .await
            .map_err(to_graphql_error)?;

        Ok(member_type.map(MemberType::from))
    }
}
