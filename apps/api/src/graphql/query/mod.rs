//! GraphQL queries for Kinship
//!
//! Root lists read the store directly; single-entity lookups go through the
//! request's loaders.

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::MemberTypeQuery;
pub use post::PostQuery;
pub use profile::ProfileQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(MemberTypeQuery, UserQuery, PostQuery, ProfileQuery);
