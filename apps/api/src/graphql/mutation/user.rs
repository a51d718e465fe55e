//! User mutations
//!
//! - createUser: Create a user
//! - changeUser: Update name and/or balance
//! - deleteUser: Delete a user with its profile, posts and follow edges

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::User;
use crate::models::{ChangeUser, CreateUser};

use super::validate_name;

// =============================================================================
// Input Types
// =============================================================================

#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

/// Omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl From<CreateUserInput> for CreateUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

impl From<ChangeUserInput> for ChangeUser {
    fn from(input: ChangeUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        validate_name("name", &dto.name).map_err(to_graphql_error)?;

        let exec = ExecutionContext::get(ctx)?;
        let user = exec
            .store()
            .create_user(dto.into())
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().user_written(user.id);
        tracing::info!(user_id = %user.id, "User created");

        Ok(User::from(user))
    }

    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> Result<User> {
        if let Some(name) = &dto.name {
            validate_name("name", name).map_err(to_graphql_error)?;
        }

        let exec = ExecutionContext::get(ctx)?;
        let user = exec
            .store()
            .update_user(id, dto.into())
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().user_written(id);

        Ok(User::from(user))
    }

    /// Returns the id of the deleted user
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Uuid> {
        let exec = ExecutionContext::get(ctx)?;
        exec.store().delete_user(id).await.map_err(to_graphql_error)?;

        exec.loaders().user_deleted(id);
        tracing::info!(user_id = %id, "User deleted");

        Ok(id)
    }
}
