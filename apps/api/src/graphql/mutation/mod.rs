//! GraphQL mutations for Kinship
//!
//! Every mutation is a single store write issued directly, never through a
//! loader. Once the write succeeds the affected loader entries are evicted so
//! later fields of the same operation read fresh data.

mod post;
mod profile;
mod subscription;
mod user;

pub use post::{ChangePostInput, CreatePostInput, PostMutation};
pub use profile::{ChangeProfileInput, CreateProfileInput, ProfileMutation};
pub use subscription::SubscriptionMutation;
pub use user::{ChangeUserInput, CreateUserInput, UserMutation};

use async_graphql::MergedObject;

use crate::error::{ApiError, ApiResult};

/// Maximum length of user names and post titles
const MAX_NAME_LENGTH: usize = 255;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, PostMutation, ProfileMutation, SubscriptionMutation);

/// Reject blank or oversized short text fields
fn validate_name(field: &'static str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{} must not be blank", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ApiError::ValidationError(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}
