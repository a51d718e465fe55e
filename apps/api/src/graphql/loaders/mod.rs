//! Request-scoped loaders for GraphQL resolvers
//!
//! Each resolver reads relations through a [`BatchLoader`] so that sibling
//! lookups issued in the same tick collapse into one store call.
//!
//! There are two kinds of loaders:
//! - Single-entity loaders: resolve to `Option<Arc<T>>` by id
//! - Collection loaders: resolve to `Arc<Vec<T>>` by parent id, never missing
//!
//! A [`LoaderRegistry`] bundles one of each and lives for exactly one
//! operation.

mod followers;
mod following;
mod member_type;
mod post;
mod posts_by_author;
mod profile;
mod profile_by_user;
mod user;

pub use followers::FollowersLoader;
pub use following::FollowingLoader;
pub use member_type::MemberTypeLoader;
pub use post::PostLoader;
pub use posts_by_author::PostsByAuthorLoader;
pub use profile::ProfileLoader;
pub use profile_by_user::ProfileByUserLoader;
pub use user::UserLoader;

use std::sync::Arc;

use kinship_shared_config::LoaderConfig;
use uuid::Uuid;

use crate::dataloader::{BatchLoader, Grouped};
use crate::models::{MemberTypeId, Post, Profile, SubscriptionEdge};
use crate::store::Store;

/// One batch loader per relation, scoped to a single operation
pub struct LoaderRegistry {
    pub member_types: BatchLoader<MemberTypeId, MemberTypeLoader>,
    pub users: BatchLoader<Uuid, UserLoader>,
    pub posts: BatchLoader<Uuid, PostLoader>,
    pub profiles: BatchLoader<Uuid, ProfileLoader>,
    pub posts_by_author: BatchLoader<Uuid, Grouped<PostsByAuthorLoader>>,
    pub profile_by_user: BatchLoader<Uuid, ProfileByUserLoader>,
    pub followers: BatchLoader<Uuid, Grouped<FollowersLoader>>,
    pub following: BatchLoader<Uuid, Grouped<FollowingLoader>>,
}

impl LoaderRegistry {
    /// Create a fresh registry with empty caches
    pub fn new(store: Arc<dyn Store>, config: LoaderConfig) -> Self {
        Self {
            member_types: BatchLoader::with_config(
                "member_types",
                MemberTypeLoader::new(store.clone()),
                config,
            ),
            users: BatchLoader::with_config("users", UserLoader::new(store.clone()), config),
            posts: BatchLoader::with_config("posts", PostLoader::new(store.clone()), config),
            profiles: BatchLoader::with_config(
                "profiles",
                ProfileLoader::new(store.clone()),
                config,
            ),
            posts_by_author: BatchLoader::with_config(
                "posts_by_author",
                Grouped::new(PostsByAuthorLoader::new(store.clone())),
                config,
            ),
            profile_by_user: BatchLoader::with_config(
                "profile_by_user",
                ProfileByUserLoader::new(store.clone()),
                config,
            ),
            followers: BatchLoader::with_config(
                "followers",
                Grouped::new(FollowersLoader::new(store.clone())),
                config,
            ),
            following: BatchLoader::with_config(
                "following",
                Grouped::new(FollowingLoader::new(store)),
                config,
            ),
        }
    }

    // ========== Invalidation after writes ==========

    /// A user row was created or changed
    pub fn user_written(&self, user_id: Uuid) {
        self.users.clear(&user_id);
    }

    /// A user was deleted together with everything hanging off it
    pub fn user_deleted(&self, user_id: Uuid) {
        self.users.clear(&user_id);
        self.profile_by_user.clear(&user_id);
        self.posts_by_author.clear(&user_id);
        self.followers.clear(&user_id);
        self.following.clear(&user_id);
    }

    pub fn post_written(&self, post: &Post) {
        self.posts.clear(&post.id);
        self.posts_by_author.clear(&post.author_id);
    }

    pub fn profile_written(&self, profile: &Profile) {
        self.profiles.clear(&profile.id);
        self.profile_by_user.clear(&profile.user_id);
    }

    /// A follow edge was added or removed
    pub fn edge_written(&self, edge: SubscriptionEdge) {
        self.followers.clear(&edge.author_id);
        self.following.clear(&edge.subscriber_id);
    }
}
