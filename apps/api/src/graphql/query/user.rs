//! User queries
//!
//! - users: every user, in creation order
//! - user(id): one user by id, null when missing

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::User;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let store = ExecutionContext::get(ctx)?.store();
        let users = store.list_users().await.map_err(to_graphql_error)?;

        Ok(users.into_iter().map(User::from).collect())
    }

    /// Root lookups share the user loader, so aliased `user` fields batch
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let user = loaders.users.load(id).await.map_err(to_graphql_error)?;

        Ok(user.map(User::from))
    }
}
