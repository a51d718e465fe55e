//! Relational store behind the API
//!
//! [`Store`] exposes the two primitive shapes the loaders and mutations need:
//! multi-key reads (by primary key or by foreign key) and single-row writes.
//! Each call is one round trip; batching happens above this layer.
//!
//! Two implementations are provided:
//! - [`PgStore`]: PostgreSQL through a shared sqlx connection pool
//! - [`MemoryStore`]: in-process tables that also record every call, used by
//!   tests and for running the server without a database

pub mod memory;
pub mod postgres;
pub mod utils;

pub use memory::{MemoryStore, StoreCall};
pub use postgres::PgStore;

use std::fmt::Display;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, MemberType,
    MemberTypeId, Post, Profile, SubscriptionEdge, User,
};

/// Errors raised by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted or referenced row does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The write would violate a uniqueness constraint
    #[error("{entity} already exists: {id}")]
    Conflict { entity: &'static str, id: String },

    /// Connectivity or unexpected database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, id: impl Display) -> Self {
        Self::Conflict {
            entity,
            id: id.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read and write primitives of the relational store
///
/// Multi-key reads accept de-duplicated keys and return matching rows in no
/// particular relation to the key order; keys without rows are simply absent.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Check that the store is reachable
    async fn ping(&self) -> StoreResult<()>;

    // Member types

    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>>;

    async fn find_member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>>;

    // Users

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>>;

    async fn create_user(&self, input: CreateUser) -> StoreResult<User>;

    /// Fails with NotFound when no user has `id`
    async fn update_user(&self, id: Uuid, input: ChangeUser) -> StoreResult<User>;

    /// Deletes the user together with its profile, posts and follow edges.
    /// Returns the deleted row.
    async fn delete_user(&self, id: Uuid) -> StoreResult<User>;

    // Posts

    async fn list_posts(&self) -> StoreResult<Vec<Post>>;

    async fn find_posts_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Post>>;

    /// Posts of any of `author_ids`, oldest first within an author
    async fn find_posts_by_author_ids(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>>;

    /// Fails with NotFound when the author does not exist
    async fn create_post(&self, input: CreatePost) -> StoreResult<Post>;

    async fn update_post(&self, id: Uuid, input: ChangePost) -> StoreResult<Post>;

    async fn delete_post(&self, id: Uuid) -> StoreResult<Post>;

    // Profiles

    async fn list_profiles(&self) -> StoreResult<Vec<Profile>>;

    async fn find_profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>>;

    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>>;

    /// Fails with NotFound for a missing user and Conflict when the user
    /// already has a profile
    async fn create_profile(&self, input: CreateProfile) -> StoreResult<Profile>;

    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> StoreResult<Profile>;

    async fn delete_profile(&self, id: Uuid) -> StoreResult<Profile>;

    // Subscriptions

    async fn find_subscriptions_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>>;

    async fn find_subscriptions_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>>;

    /// Fails with Conflict, writing nothing, when the edge already exists
    async fn create_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()>;

    /// Fails with NotFound, writing nothing, when the edge does not exist
    async fn delete_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()>;
}
