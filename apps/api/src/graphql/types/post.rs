//! Post GraphQL type

use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::models::Post as DbPost;

use super::user::User;

/// Post exposed via GraphQL
pub struct Post {
    inner: Arc<DbPost>,
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self {
            inner: Arc::new(post),
        }
    }
}

impl From<Arc<DbPost>> for Post {
    fn from(inner: Arc<DbPost>) -> Self {
        Self { inner }
    }
}

#[Object]
impl Post {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn author_id(&self) -> Uuid {
        self.inner.author_id
    }

    /// Author of the post (batched with every other author lookup in the tick)
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let author = loaders
            .users
            .load(self.inner.author_id)
            .await
            .map_err(to_graphql_error)?;

        Ok(author.map(User::from))
    }
}
