//! Profile GraphQL type

use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::models::Profile as DbProfile;

use super::member_type::{MemberType, MemberTypeId};
use super::user::User;

/// Profile exposed via GraphQL
pub struct Profile {
    inner: Arc<DbProfile>,
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self {
            inner: Arc::new(profile),
        }
    }
}

impl From<Arc<DbProfile>> for Profile {
    fn from(inner: Arc<DbProfile>) -> Self {
        Self { inner }
    }
}

#[Object]
impl Profile {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    async fn user_id(&self) -> Uuid {
        self.inner.user_id
    }

    async fn member_type_id(&self) -> MemberTypeId {
        self.inner.member_type_id.into()
    }

    // Relationship resolvers

    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let member_type = loaders
            .member_types
            .load(self.inner.member_type_id)
            .await
            .map_err(to_graphql_error)?;

        Ok(member_type.map(MemberType::from))
    }

    /// Owner of the profile
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let loaders = ExecutionContext::get(ctx)?.loaders();
        let user = loaders
            .users
            .load(self.inner.user_id)
            .await
            .map_err(to_graphql_error)?;

        Ok(user.map(User::from))
    }
}
