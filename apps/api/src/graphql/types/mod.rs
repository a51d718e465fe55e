//! GraphQL type definitions for Kinship
//!
//! Object types wrap the store rows in an `Arc` so values handed out by the
//! loaders are shared rather than cloned.

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::Post;
pub use profile::Profile;
pub use user::User;
