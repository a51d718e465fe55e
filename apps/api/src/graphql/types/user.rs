//! User GraphQL type
//!
//! Every relation on a user goes through the request's loaders, so listing
//! many users with their posts, profile or follow lists costs one store call
//! per relation rather than one per user.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::models::User as DbUser;

use super::post::Post;
use super::profile::Profile;

/// User exposed via GraphQL
pub struct User {
    inner: Arc<DbUser>,
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            inner: Arc::new(user),
        }
    }
}

impl From<Arc<DbUser>> for User {
    fn from(inner: Arc<DbUser>) -> Self {
        Self { inner }
    }
}

/// Resolve ids through the user loader, dropping ids with no user
async fn load_users(ctx: &Context<'_>, ids: &[Uuid]) -> Result<Vec<User>> {
    let loaders = ExecutionContext::get(ctx)?.loaders();
    let users = loaders
        .users
        .load_many(ids.iter().copied())
        .await
        .map_err(to_graphql_error)?;

    Ok(users.into_iter().flatten().map(User::from).collect())
}

#[Object]
impl User {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn balance(&self) -> f64 {
        self.inner.balance
    }

    // Relationship resolvers

    /// The user's profile, null when none exists
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let profile = loaders
            .profile_by_user
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(profile.map(Profile::from))
    }

    /// Posts written by this user, oldest first
    async fn posts(&self, ctx: &Context<'_>) -> Result<Option<Vec<Post>>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let posts = loaders
            .posts_by_author
            .load_group(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(Some(posts.iter().cloned().map(Post::from).collect()))
    }

    /// Users this user follows
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let author_ids = loaders
            .following
            .load_group(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        load_users(ctx, &author_ids).await.map(Some)
    }

    /// Users following this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let subscriber_ids = loaders
            .followers
            .load_group(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        load_users(ctx, &subscriber_ids).await.map(Some)
    }
}
