//! Test fixtures: seeded stores and a GraphQL harness over them

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use kinship_api::graphql::{self, build_schema, KinshipSchema};
use kinship_api::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, MemberType,
    MemberTypeId, Post, Profile, SubscriptionEdge, User,
};
use kinship_api::store::{MemoryStore, Store, StoreError, StoreResult};
use kinship_shared_config::LoaderConfig;
use uuid::Uuid;

/// Schema plus the in-memory store it runs against
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub schema: KinshipSchema,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            schema: build_schema(),
        }
    }

    /// Execute one operation with a fresh execution context
    pub async fn execute(&self, request: impl Into<async_graphql::Request>) -> async_graphql::Response {
        graphql::execute(
            &self.schema,
            self.store.clone(),
            LoaderConfig::default(),
            request,
        )
        .await
    }

    pub async fn user(&self, name: &str) -> User {
        seed_user(self.store.as_ref(), name).await
    }

    pub async fn post(&self, author: &User, title: &str) -> Post {
        seed_post(self.store.as_ref(), author, title).await
    }

    pub async fn profile(&self, user: &User, member_type_id: MemberTypeId) -> Profile {
        seed_profile(self.store.as_ref(), user, member_type_id).await
    }

    pub async fn follow(&self, subscriber: &User, author: &User) {
        seed_follow(self.store.as_ref(), subscriber, author).await
    }
}

pub async fn seed_user(store: &dyn Store, name: &str) -> User {
    store
        .create_user(CreateUser {
            name: name.to_string(),
            balance: 100.0,
        })
        .await
        .expect("seed user")
}

pub async fn seed_post(store: &dyn Store, author: &User, title: &str) -> Post {
    store
        .create_post(CreatePost {
            title: title.to_string(),
            content: format!("{} by {}", title, author.name),
            author_id: author.id,
        })
        .await
        .expect("seed post")
}

pub async fn seed_profile(store: &dyn Store, user: &User, member_type_id: MemberTypeId) -> Profile {
    store
        .create_profile(CreateProfile {
            is_male: true,
            year_of_birth: 1990,
            user_id: user.id,
            member_type_id,
        })
        .await
        .expect("seed profile")
}

pub async fn seed_follow(store: &dyn Store, subscriber: &User, author: &User) {
    store
        .create_subscription(SubscriptionEdge::new(subscriber.id, author.id))
        .await
        .expect("seed subscription")
}

/// Store that delegates to a [`MemoryStore`] but fails every posts-by-author read
pub struct FailingPostsStore {
    pub inner: MemoryStore,
}

impl FailingPostsStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl Store for FailingPostsStore {
    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }

    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>> {
        self.inner.list_member_types().await
    }

    async fn find_member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>> {
        self.inner.find_member_types_by_ids(ids).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.inner.list_users().await
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        self.inner.find_users_by_ids(ids).await
    }

    async fn create_user(&self, input: CreateUser) -> StoreResult<User> {
        self.inner.create_user(input).await
    }

    async fn update_user(&self, id: Uuid, input: ChangeUser) -> StoreResult<User> {
        self.inner.update_user(id, input).await
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<User> {
        self.inner.delete_user(id).await
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.inner.list_posts().await
    }

    async fn find_posts_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        self.inner.find_posts_by_ids(ids).await
    }

    async fn find_posts_by_author_ids(&self, _author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_post(&self, input: CreatePost) -> StoreResult<Post> {
        self.inner.create_post(input).await
    }

    async fn update_post(&self, id: Uuid, input: ChangePost) -> StoreResult<Post> {
        self.inner.update_post(id, input).await
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<Post> {
        self.inner.delete_post(id).await
    }

    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        self.inner.list_profiles().await
    }

    async fn find_profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        self.inner.find_profiles_by_ids(ids).await
    }

    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        self.inner.find_profiles_by_user_ids(user_ids).await
    }

    async fn create_profile(&self, input: CreateProfile) -> StoreResult<Profile> {
        self.inner.create_profile(input).await
    }

    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> StoreResult<Profile> {
        self.inner.update_profile(id, input).await
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<Profile> {
        self.inner.delete_profile(id).await
    }

    async fn find_subscriptions_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        self.inner.find_subscriptions_by_author_ids(author_ids).await
    }

    async fn find_subscriptions_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        self.inner
            .find_subscriptions_by_subscriber_ids(subscriber_ids)
            .await
    }

    async fn create_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()> {
        self.inner.create_subscription(edge).await
    }

    async fn delete_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()> {
        self.inner.delete_subscription(edge).await
    }
}
