//! Profile mutations
//!
//! - createProfile: Create the single profile of a user
//! - changeProfile: Update profile attributes or membership tier
//! - deleteProfile: Delete a profile

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::graphql::context::ExecutionContext;
use crate::graphql::to_graphql_error;
use crate::graphql::types::{MemberTypeId, Profile};
use crate::models::{ChangeProfile, CreateProfile};

// =============================================================================
// Input Types
// =============================================================================

#[derive(Debug, InputObject)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

/// Omitted fields are left unchanged; the owning user is fixed
#[derive(Debug, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl From<CreateProfileInput> for CreateProfile {
    fn from(input: CreateProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id.into(),
        }
    }
}

impl From<ChangeProfileInput> for ChangeProfile {
    fn from(input: ChangeProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            member_type_id: input.member_type_id.map(Into::into),
        }
    }
}

// =============================================================================
// Mutations
// =============================================================================

#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    /// Fails with CONFLICT when the user already has a profile
    async fn create_profile(&self, ctx: &Context<'_>, dto: CreateProfileInput) -> Result<Profile> {
        let exec = ExecutionContext::get(ctx)?;
        let profile = exec
            .store()
            .create_profile(dto.into())
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().profile_written(&profile);
        tracing::info!(profile_id = %profile.id, user_id = %profile.user_id, "Profile created");

        Ok(Profile::from(profile))
    }

    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let exec = ExecutionContext::get(ctx)?;
        let profile = exec
            .store()
            .update_profile(id, dto.into())
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().profile_written(&profile);

        Ok(Profile::from(profile))
    }

    /// Returns the id of the deleted profile
    async fn delete_profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Uuid> {
        let exec = ExecutionContext::get(ctx)?;
        let profile = exec
            .store()
            .delete_profile(id)
            .await
            .map_err(to_graphql_error)?;

        exec.loaders().profile_written(&profile);

        Ok(profile.id)
    }
}
