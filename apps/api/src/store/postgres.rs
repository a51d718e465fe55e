//! PostgreSQL store
//!
//! Every method is one statement against the shared pool. Multi-key reads use
//! `= ANY($1)` so a whole batch of keys costs a single round trip.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{
    Violation, MEMBER_TYPE_COLUMNS, POST_COLUMNS, PROFILE_COLUMNS, SUBSCRIPTION_COLUMNS,
    USER_COLUMNS,
};
use super::{Store, StoreError, StoreResult};
use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, MemberType,
    MemberTypeId, Post, Profile, SubscriptionEdge, User,
};

/// Store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new PgStore instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded migrations against the pool
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

/// Map a foreign key violation on a write to NotFound for the referenced user
fn missing_user_on_fk(err: sqlx::Error, user_id: Uuid) -> StoreError {
    match Violation::classify(&err) {
        Some(Violation::ForeignKey { .. }) => StoreError::not_found("user", user_id),
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ========== Member types ==========

    async fn list_member_types(&self) -> StoreResult<Vec<MemberType>> {
        let sql = format!("SELECT {} FROM member_types ORDER BY id", MEMBER_TYPE_COLUMNS);
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_member_types_by_ids(&self, ids: &[MemberTypeId]) -> StoreResult<Vec<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = ANY($1)",
            MEMBER_TYPE_COLUMNS
        );
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    // ========== Users ==========

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1)", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_user(&self, input: CreateUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (name, balance) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(&input.name)
            .bind(input.balance)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_user(&self, id: Uuid, input: ChangeUser) -> StoreResult<User> {
        let sql = format!(
            r#"UPDATE users
            SET name = COALESCE($2, name),
                balance = COALESCE($3, balance)
            WHERE id = $1
            RETURNING {}"#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(input.name)
            .bind(input.balance)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<User> {
        // Profile, posts and subscriptions go with it via ON DELETE CASCADE
        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {}", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    // ========== Posts ==========

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts ORDER BY created_at, id", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_posts_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = ANY($1)", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_posts_by_author_ids(&self, author_ids: &[Uuid]) -> StoreResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1) ORDER BY author_id, created_at, id",
            POST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_post(&self, input: CreatePost) -> StoreResult<Post> {
        let sql = format!(
            "INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| missing_user_on_fk(err, input.author_id))
    }

    async fn update_post(&self, id: Uuid, input: ChangePost) -> StoreResult<Post> {
        let sql = format!(
            r#"UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING {}"#,
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(input.title)
            .bind(input.content)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("post", id))
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<Post> {
        let sql = format!("DELETE FROM posts WHERE id = $1 RETURNING {}", POST_COLUMNS);
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("post", id))
    }

    // ========== Profiles ==========

    async fn list_profiles(&self) -> StoreResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles ORDER BY created_at, id",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_profiles_by_ids(&self, ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = ANY($1)", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_profiles_by_user_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ANY($1)",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_profile(&self, input: CreateProfile) -> StoreResult<Profile> {
        let sql = format!(
            r#"INSERT INTO profiles (is_male, year_of_birth, user_id, member_type_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.user_id)
            .bind(input.member_type_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match Violation::classify(&err) {
                Some(Violation::Unique { .. }) => StoreError::conflict("profile", input.user_id),
                Some(Violation::ForeignKey { .. }) => StoreError::not_found("user", input.user_id),
                None => StoreError::Database(err),
            })
    }

    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> StoreResult<Profile> {
        let sql = format!(
            r#"UPDATE profiles
            SET is_male = COALESCE($2, is_male),
                year_of_birth = COALESCE($3, year_of_birth),
                member_type_id = COALESCE($4, member_type_id)
            WHERE id = $1
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.member_type_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("profile", id))
    }

    async fn delete_profile(&self, id: Uuid) -> StoreResult<Profile> {
        let sql = format!(
            "DELETE FROM profiles WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found("profile", id))
    }

    // ========== Subscriptions ==========

    async fn find_subscriptions_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE author_id = ANY($1) ORDER BY created_at",
            SUBSCRIPTION_COLUMNS
        );
        Ok(sqlx::query_as::<_, SubscriptionEdge>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_subscriptions_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> StoreResult<Vec<SubscriptionEdge>> {
        let sql = format!(
            "SELECT {} FROM subscriptions WHERE subscriber_id = ANY($1) ORDER BY created_at",
            SUBSCRIPTION_COLUMNS
        );
        Ok(sqlx::query_as::<_, SubscriptionEdge>(&sql)
            .bind(subscriber_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()> {
        let result = sqlx::query(
            r#"INSERT INTO subscriptions (subscriber_id, author_id)
            VALUES ($1, $2)
            ON CONFLICT (subscriber_id, author_id) DO NOTHING"#,
        )
        .bind(edge.subscriber_id)
        .bind(edge.author_id)
        .execute(&self.pool)
        .await
        .map_err(|err| match Violation::classify(&err) {
            Some(violation @ Violation::ForeignKey { .. }) => {
                let missing = match violation.constraint() {
                    Some("subscriptions_author_id_fkey") => edge.author_id,
                    _ => edge.subscriber_id,
                };
                StoreError::not_found("user", missing)
            }
            _ => StoreError::Database(err),
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::conflict("subscription", edge));
        }

        Ok(())
    }

    async fn delete_subscription(&self, edge: SubscriptionEdge) -> StoreResult<()> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE subscriber_id = $1 AND author_id = $2")
                .bind(edge.subscriber_id)
                .bind(edge.author_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("subscription", edge));
        }

        Ok(())
    }
}
