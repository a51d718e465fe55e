//! Post mutations
//!
//! - createPost: Create a post for an existing author
//! - changePost: Update title and/or content
//! - deletePost: Delete a post

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::Post;
use crate::models::{ChangePost, CreatePost};

use super::validate_name;

// =============================================================================
// Input Types
// =============================================================================

#[derive(Debug, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Omitted fields are left unchanged; the author is fixed
#[derive(Debug, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<CreatePostInput> for CreatePost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        }
    }
}

impl From<ChangePostInput> for ChangePost {
    fn from(input: ChangePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        validate_name("title", &dto.title).map_err(to_graphql_error)?;

        let exec = ExecutionContext::get(ctx)?;
        let post = exec
            .store()
            .create_post(dto.into())
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().post_written(&post);
        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");

        Ok(Post::from(post))
    }

    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangePostInput,
    ) -> Result<Post> {
        if let Some(title) = &dto.title {
            validate_name("title", title).map_err(to_graphql_error)?;
        }

        let exec = ExecutionContext::get(ctx)?;
        let post = exec
            .store()
            .update_post(id, dto.into())
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().post_written(&post);

        Ok(Post::from(post))
    }

    /// Returns the id of the deleted post
    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Uuid> {
        let exec = ExecutionContext::get(ctx)?;
        let post = exec.store().delete_post(id).await.map_err(to_graphql_error)?;

        exec.loaders().post_written(&post);

        Ok(post.id)
    }
}
