//! Post queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::Post;

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let store = ExecutionContext::get(ctx)?.store();
        let posts = store.list_posts().await.map_err(to_graphql_error)?;

        Ok(posts.into_iter().map(Post::from).collect())
    }

    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Post>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let post = loaders.posts.load(id).await.map_err(to_graphql_error)?;

        Ok(post.map(Post::from))
    }
}
