//! In-process store
//!
//! Rows live in insertion-ordered tables behind a lock. Every trait call is
//! appended to a call log so tests can assert how many round trips a
//! request cost.

use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, MemberType,
    MemberTypeId, Post, Profile, SubscriptionEdge, User,
};

/// One recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCall {
    /// Trait method name, e.g. `find_users_by_ids`
    pub op: &'static str,

    /// Number of keys passed to a multi-key read, zero otherwise
    pub keys: usize,
}

#[derive(Default)]
struct Tables {
    member_types: Vec<MemberType>,
    users: Vec<User>,
    posts: Vec<Post>,
    profiles: Vec<Profile>,
    subscriptions: Vec<SubscriptionEdge>,
}

/// Store holding every table in memory
pub struct MemoryStore {
    tables: RwLock<Tables>,
    calls: Mutex<Vec<StoreCall>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store seeded with the member types
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                member_types: MemberType::seed(),
                ..Default::default()
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded calls to `op`
    pub fn calls(&self, op: &str) -> usize {
        self.call_log().iter().filter(|call| call.op == op).count()
    }

    /// Every recorded call, oldest first
    pub fn call_log(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Total number of recorded calls
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, op: &'static str, keys: usize) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(StoreCall { op, keys });
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|user| user.id == id)
    }

    fn require_user(&self, id: Uuid) -> StoreResult<()> {
        if self.user_exists(id) {
            Ok(())
        } else {
            Err(StoreError::not_found("user", id))
        }
    }
}

fn remove_by<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    let index = rows.iter().position(pred)?;
    Some(rows.remove(index))
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>> {
        self.record("list_member_types", 0);
        Ok(self.read().member_types.clone())
    }

    async fn find_member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>> {
        self.record("find_member_types_by_ids", ids.len());
        Ok(self
            .read()
            .member_types
            .iter()
            .filter(|member_type| ids.contains(&member_type.id))
            .cloned()
            .collect())
    }

    // ========== Users ==========

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.record("list_users", 0);
        Ok(self.read().users.clone())
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        self.record("find_users_by_ids", ids.len());
        Ok(self
            .read()
            .users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn create_user(&self, input: CreateUser) -> StoreResult<User> {
        self.record("create_user", 0);
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            balance: input.balance,
        };
        self.write().users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, input: ChangeUser) -> StoreResult<User> {
        self.record("update_user", 0);
        let mut tables = self.write();
        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;
        input.apply(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<User> {
        self.record("delete_user", 0);
        let mut tables = self.write();
        let user = remove_by(&mut tables.users, |user| user.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;

        tables.posts.retain(|post| post.author_id != id);
        tables.profiles.retain(|profile| profile.user_id != id);
        tables.subscriptions.retain(|edge| !edge.touches(id));

        Ok(user)
    }

    // ========== Posts ==========

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.record("list_posts", 0);
        Ok(self.read().posts.clone())
    }

    async fn find_posts_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        self.record("find_posts_by_ids", ids.len());
        Ok(self
            .read()
            .posts
            .iter()
            .filter(|post| ids.contains(&post.id))
            .cloned()
            .collect())
    }

    async fn find_posts_by_author_ids(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        self.record("find_posts_by_author_ids", author_ids.len());
        Ok(self
            .read()
            .posts
            .iter()
            .filter(|post| author_ids.contains(&post.author_id))
            .cloned()
            .collect())
    }

    async fn create_post(&self, input: CreatePost) -> StoreResult<Post> {
        self.record("create_post", 0);
        let mut tables = self.write();
        tables.require_user(input.author_id)?;

        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, input: ChangePost) -> StoreResult<Post> {
        self.record("update_post", 0);
        let mut tables = self.write();
        let post = tables
            .posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| StoreError::not_found("post", id))?;
        input.apply(post);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<Post> {
        self.record("delete_post", 0);
        remove_by(&mut self.write().posts, |post| post.id == id)
            .ok_or_else(|| StoreError::not_found("post", id))
    }

    // ========== Profiles ==========

    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        self.record("list_profiles", 0);
        Ok(self.read().profiles.clone())
    }

    async fn find_profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        self.record("find_profiles_by_ids", ids.len());
        Ok(self
            .read()
            .profiles
            .iter()
            .filter(|profile| ids.contains(&profile.id))
            .cloned()
            .collect())
    }

    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        self.record("find_profiles_by_user_ids", user_ids.len());
        Ok(self
            .read()
            .profiles
            .iter()
            .filter(|profile| user_ids.contains(&profile.user_id))
            .cloned()
            .collect())
    }

    async fn create_profile(&self, input: CreateProfile) -> StoreResult<Profile> {
        self.record("create_profile", 0);
        let mut tables = self.write();
        tables.require_user(input.user_id)?;

        if tables
            .profiles
            .iter()
            .any(|profile| profile.user_id == input.user_id)
        {
            return Err(StoreError::conflict("profile", input.user_id));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id,
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> StoreResult<Profile> {
        self.record("update_profile", 0);
        let mut tables = self.write();
        let profile = tables
            .profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .ok_or_else(|| StoreError::not_found("profile", id))?;
        input.apply(profile);
        Ok(profile.clone())
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<Profile> {
        self.record("delete_profile", 0);
        remove_by(&mut self.write().profiles, |profile| profile.id == id)
            .ok_or_else(|| StoreError::not_found("profile", id))
    }

    // ========== Subscriptions ==========

    async fn find_subscriptions_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        self.record("find_subscriptions_by_author_ids", author_ids.len());
        Ok(self
            .read()
            .subscriptions
            .iter()
            .filter(|edge| author_ids.contains(&edge.author_id))
            .copied()
            .collect())
    }

    async fn find_subscriptions_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        self.record("find_subscriptions_by_subscriber_ids", subscriber_ids.len());
        Ok(self
            .read()
            .subscriptions
            .iter()
            .filter(|edge| subscriber_ids.contains(&edge.subscriber_id))
            .copied()
            .collect())
    }

    async fn create_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()> {
        self.record("create_subscription", 0);
        let mut tables = self.write();
        tables.require_user(edge.subscriber_id)?;
        tables.require_user(edge.author_id)?;

        if tables.subscriptions.contains(&edge) {
            return Err(StoreError::conflict("subscription", edge));
        }

        tables.subscriptions.push(edge);
        Ok(())
    }

    async fn delete_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()> {
        self.record("delete_subscription", 0);
        remove_by(&mut self.write().subscriptions, |existing| *existing == edge)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("subscription", edge))
    }
}
