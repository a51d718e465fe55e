//! Follow-graph mutations
//!
//! - subscribeTo: `userId` starts following `authorId`
//! - unsubscribeFrom: `userId` stops following `authorId`

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::User;
use crate::models::SubscriptionEdge;

#[derive(Default)]
pub struct SubscriptionMutation;

#[Object]
impl SubscriptionMutation {
    /// Returns the subscriber. Fails with CONFLICT if the edge already exists.
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<User> {
        let exec = ExecutionContext::get(ctx)?;
        let edge = SubscriptionEdge::new(user_id, author_id);

        exec.store()
            .create_subscription(edge)
            .await
            .map_err(to_graphql_error)?;
        exec.loaders().edge_written(edge);
        tracing::info!(edge = %edge, "Subscription created");

        let subscriber = exec
            .store()
            .find_users_by_ids(&[user_id])
            .await
            .map_err(to_graphql_error)?
            .into_iter()
            .next()
            .ok_or_else(|| to_graphql_error(ApiError::not_found("user", user_id.to_string())))?;

        Ok(User::from(subscriber))
    }

    /// Fails with NOT_FOUND if the edge does not exist
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let exec = ExecutionContext::get(ctx)?;
        let edge = SubscriptionEdge::new(user_id, author_id);

        exec.store()
            .delete_subscription(edge)
            .await
            .map_err(to_graphql_error)?;
        exec.loaders().edge_written(edge);
        tracing::info!(edge = %edge, "Subscription removed");

        Ok(true)
    }
}
